//! Error types for leadscout-search

use thiserror::Error;

/// Search error type
#[derive(Debug, Error)]
pub enum Error {
    /// Client not configured (missing API key)
    #[error("search not configured: {0}")]
    NotConfigured(String),

    /// Service returned a non-success status
    #[error("search api error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Body was not valid JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
