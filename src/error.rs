//! Gateway error types.
//!
//! Client-input problems and upstream failures both funnel into
//! [`GatewayError`]; the dispatcher converts every variant into the same
//! 500 response with a JSON `error` field.

use thiserror::Error;

/// Errors surfaced by the request dispatcher.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required request parameter was absent or empty.
    #[error("Missing required parameter \"{0}\"")]
    MissingParameter(&'static str),

    /// The upstream API answered with a non-success status.
    #[error("Request failed with \"{0}\"")]
    UpstreamStatus(u16),

    /// The outbound request itself failed (connect, TLS, body decode).
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// A local file read failed outside the static 404 path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for dispatcher operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
