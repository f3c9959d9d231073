//! Per-identity session state.
//!
//! # Design
//! A `Session` is an ordinary value owned by whoever drives the client, so
//! several identities can coexist in one process. "Logged in" is not stored
//! separately: it is exactly "a token is present", which makes the two
//! impossible to disagree.

use crate::config::DEFAULT_USER_AGENT;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user_id: Option<String>,
    user_agent: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl Session {
    pub fn new(user_agent: &str) -> Self {
        Self {
            token: None,
            user_id: None,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Store a raw token and mark the session logged in. The token is not
    /// inspected; it is sent verbatim as the `cookie` header.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Default subject for user-scoped endpoints when a call names none.
    pub fn set_user_id(&mut self, user_id: &str) {
        self.user_id = Some(user_id.to_string());
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = user_agent.to_string();
    }

    /// Record a successful login.
    pub(crate) fn establish(&mut self, token: String, user_id: String) {
        self.token = Some(token);
        self.user_id = Some(user_id);
    }

    /// Gate for every authenticated operation. Returns the token to send.
    pub fn verify_logged_in(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::Unauthenticated)
    }
}
