//! Muninn error types

use std::time::Duration;

/// Failure of a single upstream call attempt.
///
/// Transport errors are recovered locally by the [`Fetcher`](crate::Fetcher)
/// retry loop and never surface to gateway callers on their own; an attempt
/// sequence that exhausts its retry budget surfaces the final transport error
/// wrapped in [`MuninnError::FetchExhausted`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The attempt did not complete within the per-attempt timeout.
    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure: DNS, refused connection, reset, TLS.
    #[error("connection error: {0}")]
    Connection(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The upstream answered 2xx but the body could not be decoded.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum MuninnError {
    /// The cache storage itself is unreachable — not a statement about data
    /// freshness. Raised by the remote backend only; the in-process map
    /// cannot become unavailable.
    #[error("cache backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Every attempt of one logical fetch failed. Wraps the final
    /// [`TransportError`].
    #[error("upstream fetch exhausted after {attempts} attempts: {source}")]
    FetchExhausted {
        /// Total attempts performed (initial call + retries).
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for muninn operations
pub type Result<T> = std::result::Result<T, MuninnError>;
