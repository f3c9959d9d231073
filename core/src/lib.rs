//! Client for the Peloton HTTP API.
//!
//! # Overview
//! Authenticates a user, keeps the resulting session token, and exposes one
//! typed call per remote resource: profile, followers/following, workouts,
//! performance graphs and rides.
//!
//! # Design
//! - `PelotonClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network, so the request convention is
//!   testable as plain data.
//! - `Transport` executes requests; `UreqTransport` is the blocking default.
//! - `Session` is an explicit value, not process-wide state. `Peloton`
//!   bundles a session, a client and a transport into the facade most
//!   callers want.
//! - Non-2xx responses on endpoint calls are decoded and returned, not
//!   turned into errors.
//!
//! ```no_run
//! use peloton_core::{AuthenticateOptions, Peloton, WorkoutsOptions};
//!
//! # fn main() -> Result<(), peloton_core::ApiError> {
//! let mut peloton = Peloton::from_env();
//! peloton.authenticate(&AuthenticateOptions::new("rider@example.com", "secret"))?;
//! let page = peloton.workouts(&WorkoutsOptions::default())?;
//! for workout in page.data {
//!     println!("{:?} {:?}", workout.id, workout.fitness_discipline);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod peloton;
pub mod session;
pub mod transport;
pub mod types;

pub use client::PelotonClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::{
    AuthenticateOptions, FollowerFollowingOptions, RideDetailsOptions, RideFriendsOptions,
    RideOptions, UserOptions, WorkoutOptions, WorkoutPerformanceGraphOptions, WorkoutsOptions,
};
pub use peloton::Peloton;
pub use session::Session;
pub use transport::{Transport, UreqTransport};
pub use types::{
    ApiResponse, Authenticated, FollowerFollowingResponse, LoginResponse, MeResponse, Page,
    PerformanceMetric, PerformanceSummary, Ride, RideDetailsResponse, RideFriendsResponse,
    RideResponse, SessionCheckResponse, UserResponse, UserSummary, Workout,
    WorkoutPerformanceGraphResponse, WorkoutResponse, WorkoutsResponse,
};
