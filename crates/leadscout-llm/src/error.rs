//! Generation service failures
//!
//! The retry wrapper consults [`Error::is_retryable`]: a missing credential
//! fails at once, anything the service or the network produced is retried.

use thiserror::Error;

/// Generation service error
#[derive(Debug, Error)]
pub enum Error {
    /// Credential or endpoint missing
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// Non-success status from the service, message already sanitized
    #[error("api error: {0}")]
    Api(String),

    /// HTTP 429
    #[error("rate limit exceeded")]
    RateLimit,

    /// Body could not be decoded or had no choices
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Connection or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// No response within the request timeout
    #[error("timeout after {0}ms")]
    Timeout(u64),
}

impl Error {
    /// Whether another attempt could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotConfigured(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_configuration_is_final() {
        assert!(!Error::NotConfigured("OPENAI_API_KEY not set".into()).is_retryable());
        assert!(Error::RateLimit.is_retryable());
        assert!(Error::Timeout(120_000).is_retryable());
        assert!(Error::Api("bad gateway".into()).is_retryable());
        assert!(Error::Network("reset".into()).is_retryable());
    }
}
