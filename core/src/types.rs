//! Response shapes for the Peloton API.
//!
//! # Design
//! Known fields are typed so a wrong JSON type surfaces as a decode error
//! instead of being passed on. They are all optional because the remote service omits
//! fields freely and because error bodies (non-2xx) are decoded into the same
//! shapes rather than rejected. Anything not modelled lands in `extra`, so no
//! part of the body is lost.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw response: status and headers as received, body decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: T,
}

/// Result of a successful login: the raw response plus the session cookie
/// that was extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub cookie: String,
    pub response: ApiResponse<LoginResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckResponse {
    pub is_valid: Option<bool>,
    pub user: Option<UserSummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The authenticated user's full profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<i64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub total_workouts: Option<i64>,
    pub total_followers: Option<i64>,
    pub total_following: Option<i64>,
    pub is_profile_private: Option<bool>,
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Another user's public profile. Asking for your own id returns the full
/// profile; the private fields then appear in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Option<String>,
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub total_workouts: Option<i64>,
    pub total_followers: Option<i64>,
    pub total_following: Option<i64>,
    pub is_profile_private: Option<bool>,
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry in a follower/following list or an embedded `user` join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Option<String>,
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub is_profile_private: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub total: Option<i64>,
    pub count: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub page_count: Option<i64>,
    pub show_previous: Option<bool>,
    pub show_next: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type FollowerFollowingResponse = Page<UserSummary>;

pub type WorkoutsResponse = Page<Workout>;

/// Recent workouts of followed users on a given ride.
pub type RideFriendsResponse = Page<Workout>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Option<String>,
    pub fitness_discipline: Option<String>,
    pub device_type: Option<String>,
    pub user_id: Option<String>,
    pub created_at: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub total_work: Option<f64>,
    pub is_total_work_personal_record: Option<bool>,
    /// Present when the request joined `ride`.
    pub ride: Option<Ride>,
    /// Present when the request joined `user`.
    pub user: Option<UserSummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type WorkoutResponse = Workout;

/// Class metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub fitness_discipline: Option<String>,
    pub instructor_id: Option<String>,
    pub duration: Option<i64>,
    pub difficulty_estimate: Option<f64>,
    pub image_url: Option<String>,
    pub original_air_time: Option<i64>,
    pub total_workouts: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type RideResponse = Ride;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideDetailsResponse {
    pub ride: Option<Ride>,
    pub playlist: Option<Value>,
    pub segments: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Time series for one workout, sampled every Nth point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPerformanceGraphResponse {
    pub duration: Option<i64>,
    pub is_class_plan_shown: Option<bool>,
    #[serde(default)]
    pub seconds_since_pedaling_start: Vec<i64>,
    #[serde(default)]
    pub average_summaries: Vec<PerformanceSummary>,
    #[serde(default)]
    pub summaries: Vec<PerformanceSummary>,
    #[serde(default)]
    pub metrics: Vec<PerformanceMetric>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub display_name: Option<String>,
    pub display_unit: Option<String>,
    pub slug: Option<String>,
    pub value: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub display_name: Option<String>,
    pub display_unit: Option<String>,
    pub slug: Option<String>,
    pub max_value: Option<f64>,
    pub average_value: Option<f64>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
