//! Error types for the Peloton API client.
//!
//! # Design
//! A non-2xx status on an endpoint call is not an error: the body is decoded
//! and handed back so the caller can inspect it. The one exception is login,
//! where a rejected status means there is no session to establish, so it
//! lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `PelotonClient` and the `Peloton` facade.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An authenticated operation was invoked before `authenticate` or
    /// `set_token`. Raised before any request is built.
    #[error("must authenticate before making API call")]
    Unauthenticated,

    /// No `user_id` was given and the session has none to fall back on.
    #[error("no user id given and none stored in the session")]
    MissingUserId,

    /// A required path parameter was empty.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A path parameter was `.` or `..`, which URL normalization would
    /// silently drop from the path.
    #[error("invalid value `{value}` for parameter `{name}`")]
    InvalidParameter { name: &'static str, value: String },

    /// The login response carried no `set-cookie` entry with the session
    /// cookie name.
    #[error("login response did not set the `{name}` cookie")]
    MissingSessionCookie { name: String },

    /// The login request was answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Connection, DNS, TLS or body-read failure.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The call did not finish within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The response body was not JSON, or a present field had the wrong type.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base url `{0}`")]
    InvalidUrl(String),
}
