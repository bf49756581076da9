//! Error types for the student API client.
//!
//! # Design
//! The set of failures is closed so callers can branch on the kind of
//! failure without string matching. A missing record is not its own
//! variant: it is an `Http` error with status 404, see
//! [`ApiError::is_not_found`].

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `RestClient` and `StudentService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the server (DNS, refused connection,
    /// malformed URL, broken socket).
    #[error("network error: {0}")]
    Network(String),

    /// The round-trip exceeded the configured timeout and was abandoned.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The request body or query string could not be encoded.
    #[error("failed to serialize request: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `Http` error, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
