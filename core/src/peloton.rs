//! The `Peloton` facade: one method per remote operation.
//!
//! # Design
//! `Peloton` owns a `Session`, a `PelotonClient` and a `Transport`, and runs
//! each operation as build → execute → parse. Only the calls that change the
//! session (`authenticate`, `set_token`, `set_user_id`) take `&mut self`;
//! everything else reads the session through `&self`. Separate instances are
//! separate identities.

use tracing::{info, instrument, warn};

use crate::client::PelotonClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::options::{
    AuthenticateOptions, FollowerFollowingOptions, RideDetailsOptions, RideFriendsOptions,
    RideOptions, UserOptions, WorkoutOptions, WorkoutPerformanceGraphOptions, WorkoutsOptions,
};
use crate::session::Session;
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    ApiResponse, Authenticated, FollowerFollowingResponse, MeResponse, RideDetailsResponse,
    RideFriendsResponse, RideResponse, SessionCheckResponse, UserResponse,
    WorkoutPerformanceGraphResponse, WorkoutResponse, WorkoutsResponse,
};

pub struct Peloton<T = UreqTransport> {
    client: PelotonClient,
    session: Session,
    transport: T,
}

impl Default for Peloton<UreqTransport> {
    fn default() -> Self {
        Self::with_config(ClientConfig::default())
    }
}

impl Peloton<UreqTransport> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(&config, transport)
    }

    /// Configuration from `PELOTON_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_config(ClientConfig::from_env())
    }
}

impl<T: Transport> Peloton<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: PelotonClient::with_config(config),
            session: Session::new(&config.user_agent),
            transport,
        }
    }

    /// Resume a previously captured session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn client(&self) -> &PelotonClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn set_token(&mut self, token: &str) {
        self.session.set_token(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn set_user_id(&mut self, user_id: &str) {
        self.session.set_user_id(user_id);
    }

    /// Log in with username (or email) and password.
    ///
    /// On success the session holds the extracted cookie and user id, and
    /// the user agent is replaced when `options.user_agent` is set. On
    /// failure the session is left untouched.
    #[instrument(level = "debug", skip_all, fields(username = %options.username))]
    pub fn authenticate(
        &mut self,
        options: &AuthenticateOptions,
    ) -> Result<Authenticated, ApiError> {
        let request = self.client.build_login(&self.session, options)?;
        let response = self.send(&request)?;
        let authenticated = match self.client.parse_login(response) {
            Ok(authenticated) => authenticated,
            Err(err) => {
                warn!(error = %err, "login failed");
                return Err(err);
            }
        };

        self.session.establish(
            authenticated.cookie.clone(),
            authenticated.response.data.user_id.clone(),
        );
        if let Some(user_agent) = options.user_agent.as_deref().filter(|ua| !ua.is_empty()) {
            self.session.set_user_agent(user_agent);
        }
        info!(user_id = %authenticated.response.data.user_id, "authenticated");
        Ok(authenticated)
    }

    /// Ask the service whether the stored token is still good. The status
    /// is returned as received; interpreting it is up to the caller.
    pub fn valid_session(&self) -> Result<ApiResponse<SessionCheckResponse>, ApiError> {
        let request = self.client.build_check_session(&self.session)?;
        let response = self.send(&request)?;
        self.client.parse_check_session(response)
    }

    pub fn me(&self) -> Result<MeResponse, ApiError> {
        let request = self.client.build_me(&self.session)?;
        let response = self.send(&request)?;
        self.client.parse_me(response)
    }

    /// Profile of `options.user_id`, or of the logged-in user.
    pub fn user(&self, options: &UserOptions) -> Result<UserResponse, ApiError> {
        let request = self.client.build_user(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_user(response)
    }

    /// Users following `options.user_id` (default: the logged-in user).
    pub fn followers(
        &self,
        options: &FollowerFollowingOptions,
    ) -> Result<FollowerFollowingResponse, ApiError> {
        let request = self.client.build_followers(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_followers(response)
    }

    /// Users that `options.user_id` follows (default: the logged-in user).
    pub fn following(
        &self,
        options: &FollowerFollowingOptions,
    ) -> Result<FollowerFollowingResponse, ApiError> {
        let request = self.client.build_following(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_following(response)
    }

    pub fn workouts(&self, options: &WorkoutsOptions) -> Result<WorkoutsResponse, ApiError> {
        let request = self.client.build_workouts(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_workouts(response)
    }

    pub fn workout(&self, options: &WorkoutOptions) -> Result<WorkoutResponse, ApiError> {
        let request = self.client.build_workout(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_workout(response)
    }

    pub fn workout_performance_graph(
        &self,
        options: &WorkoutPerformanceGraphOptions,
    ) -> Result<WorkoutPerformanceGraphResponse, ApiError> {
        let request = self
            .client
            .build_workout_performance_graph(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_workout_performance_graph(response)
    }

    pub fn ride(&self, options: &RideOptions) -> Result<RideResponse, ApiError> {
        let request = self.client.build_ride(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_ride(response)
    }

    /// Recent workouts on this ride by users the logged-in user follows.
    pub fn ride_friends(
        &self,
        options: &RideFriendsOptions,
    ) -> Result<RideFriendsResponse, ApiError> {
        let request = self.client.build_ride_friends(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_ride_friends(response)
    }

    pub fn ride_details(
        &self,
        options: &RideDetailsOptions,
    ) -> Result<RideDetailsResponse, ApiError> {
        let request = self.client.build_ride_details(&self.session, options)?;
        let response = self.send(&request)?;
        self.client.parse_ride_details(response)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }
}
