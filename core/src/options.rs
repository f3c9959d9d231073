//! Per-call request options.
//!
//! Every optional field has a documented default that the client substitutes
//! when it is absent. Zero counts and empty strings are treated as absent.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_EVERY_N: u32 = 5;
pub const DEFAULT_WORKOUTS_JOINS: &str = "ride";
pub const DEFAULT_WORKOUT_JOINS: &str = "user";
pub const DEFAULT_RIDE_FRIENDS_JOINS: &str = "user";

/// Credentials for `/auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthenticateOptions {
    pub username: String,
    pub password: String,
    /// Replaces the session's user agent once login succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AuthenticateOptions {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for AuthenticateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateOptions")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOptions {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowerFollowingOptions {
    pub user_id: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

/// Options for a user's workout history. `from`/`to` bound the listed
/// workouts and `stats_from`/`stats_to` bound the aggregate stats; the remote
/// service takes them as timestamps and they are forwarded untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutsOptions {
    pub user_id: Option<String>,
    pub joins: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub stats_from: Option<String>,
    pub stats_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutOptions {
    pub workout_id: String,
    #[serde(default)]
    pub joins: Option<String>,
}

impl WorkoutOptions {
    pub fn new(workout_id: &str) -> Self {
        Self {
            workout_id: workout_id.to_string(),
            joins: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPerformanceGraphOptions {
    pub workout_id: String,
    /// Sample every Nth data point. Sent as `every_n`.
    #[serde(default)]
    pub every_n: Option<u32>,
}

impl WorkoutPerformanceGraphOptions {
    pub fn new(workout_id: &str) -> Self {
        Self {
            workout_id: workout_id.to_string(),
            every_n: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideOptions {
    pub ride_id: String,
}

impl RideOptions {
    pub fn new(ride_id: &str) -> Self {
        Self {
            ride_id: ride_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideFriendsOptions {
    pub ride_id: String,
    #[serde(default)]
    pub joins: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl RideFriendsOptions {
    pub fn new(ride_id: &str) -> Self {
        Self {
            ride_id: ride_id.to_string(),
            joins: None,
            limit: None,
            page: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideDetailsOptions {
    pub ride_id: String,
}

impl RideDetailsOptions {
    pub fn new(ride_id: &str) -> Self {
        Self {
            ride_id: ride_id.to_string(),
        }
    }
}

/// `limit`, falling back to the default for absent or zero.
pub(crate) fn resolve_limit(limit: Option<u32>) -> u32 {
    limit.filter(|&n| n > 0).unwrap_or(DEFAULT_LIMIT)
}

pub(crate) fn resolve_page(page: Option<u32>) -> u32 {
    page.unwrap_or(DEFAULT_PAGE)
}

pub(crate) fn resolve_every_n(every_n: Option<u32>) -> u32 {
    every_n.filter(|&n| n > 0).unwrap_or(DEFAULT_EVERY_N)
}

pub(crate) fn resolve_joins<'a>(joins: Option<&'a str>, default: &'a str) -> &'a str {
    joins.filter(|j| !j.is_empty()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_and_every_n_fall_back() {
        assert_eq!(resolve_limit(Some(0)), 10);
        assert_eq!(resolve_limit(Some(25)), 25);
        assert_eq!(resolve_limit(None), 10);
        assert_eq!(resolve_every_n(Some(0)), 5);
        assert_eq!(resolve_every_n(Some(1)), 1);
        assert_eq!(resolve_page(None), 0);
        assert_eq!(resolve_page(Some(3)), 3);
    }

    #[test]
    fn empty_joins_uses_default() {
        assert_eq!(resolve_joins(Some(""), "ride"), "ride");
        assert_eq!(resolve_joins(Some("strength"), "ride"), "strength");
        assert_eq!(resolve_joins(None, "user"), "user");
    }

    #[test]
    fn debug_hides_password() {
        let options = AuthenticateOptions::new("rider", "hunter2");
        let rendered = format!("{options:?}");
        assert!(rendered.contains("rider"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn workouts_options_deserialize_from_partial_json() {
        let options: WorkoutsOptions =
            serde_json::from_str(r#"{"joins":"strength","page":2}"#).unwrap();
        assert_eq!(options.joins.as_deref(), Some("strength"));
        assert_eq!(options.page, Some(2));
        assert!(options.limit.is_none());
        assert!(options.user_id.is_none());
    }
}
