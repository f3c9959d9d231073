//! Client configuration.
//!
//! Defaults point at the production service. `from_env` lets scripts and
//! tests redirect the client (for example at `mock-server`) without code
//! changes.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.onepeloton.com";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.90 Safari/537.36";

/// Name of the cookie that carries the session id in the login response.
pub const DEFAULT_SESSION_COOKIE: &str = "peloton_session_id";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "PELOTON_BASE_URL";
pub const ENV_USER_AGENT: &str = "PELOTON_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "PELOTON_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host, optionally with a path prefix. The `auth` and `api`
    /// zones are appended to it.
    pub base_url: String,
    /// User agent a fresh session starts with.
    pub user_agent: String,
    pub session_cookie_name: String,
    /// Upper bound on a whole request, connect through body read.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `PELOTON_BASE_URL`, `PELOTON_USER_AGENT` and
    /// `PELOTON_TIMEOUT_SECS`. Unparsable or empty values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT).filter(|v| !v.trim().is_empty()) {
            config.user_agent = user_agent;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_cookie_name(mut self, name: &str) -> Self {
        self.session_cookie_name = name.to_string();
        self
    }
}
