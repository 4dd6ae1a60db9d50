//! Error types for leadscout-core
//!
//! Only these kinds cross a stage boundary. Recoverable conditions inside a
//! stage (missing biography, unknown company alias, an empty research answer)
//! are handled by that stage's fallback and never surface here.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pipeline stage an error originated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Request validation / startup
    Setup,
    /// Attendee discovery
    Discovery,
    /// Attendee table construction
    Enrichment,
    /// ICP resolution
    Profile,
    /// Scoring
    Matching,
}

impl Stage {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Discovery => "discovery",
            Self::Enrichment => "enrichment",
            Self::Profile => "profile",
            Self::Matching => "matching",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Missing credentials or invalid settings
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Inbound request is missing required fields
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The event yielded no people
    #[error("no attendees found for {event}")]
    NoAttendeesFound {
        /// Event identifier that was searched
        event: String,
    },

    /// Neither research nor the model produced a profile
    #[error("could not resolve an ideal customer profile for {company}")]
    ProfileUnresolved {
        /// Company name or domain
        company: String,
    },

    /// External service failed after retries
    #[error("{stage} upstream service error: {message}")]
    UpstreamService {
        /// Originating stage
        stage: Stage,
        /// Underlying cause
        message: String,
    },

    /// External service answered with an unusable structure
    #[error("{stage} returned a malformed response: {message}")]
    MalformedResponse {
        /// Originating stage
        stage: Stage,
        /// Parse failure description
        message: String,
        /// The text that failed to parse
        raw: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stage the error belongs to
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Error::Configuration(_) | Error::InvalidRequest(_) => Stage::Setup,
            Error::NoAttendeesFound { .. } => Stage::Discovery,
            Error::ProfileUnresolved { .. } => Stage::Profile,
            Error::UpstreamService { stage, .. } | Error::MalformedResponse { stage, .. } => {
                *stage
            }
        }
    }

    /// Stable machine-readable kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::NoAttendeesFound { .. } => "no_attendees_found",
            Error::ProfileUnresolved { .. } => "profile_unresolved",
            Error::UpstreamService { .. } => "upstream_service_error",
            Error::MalformedResponse { .. } => "malformed_response",
        }
    }

    pub(crate) fn upstream(stage: Stage, cause: impl fmt::Display) -> Self {
        Error::UpstreamService {
            stage,
            message: cause.to_string(),
        }
    }
}

/// Trait for user-friendly error messages
///
/// Provides human-readable error messages and remediation hints.
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;

    /// Whether the caller can fix this by changing the request
    fn is_user_correctable(&self) -> bool;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Configuration(msg) => format!("Service is not configured: {msg}"),
            Error::InvalidRequest(msg) => msg.clone(),
            Error::NoAttendeesFound { event } => {
                format!("No attendees or speakers could be found for {event}.")
            }
            Error::ProfileUnresolved { company } => {
                format!("Could not determine the ideal customer profile for {company}.")
            }
            Error::UpstreamService { stage, message } => {
                format!("An external service failed during {stage}: {message}")
            }
            Error::MalformedResponse { stage, .. } => {
                format!("An external service returned an unreadable answer during {stage}.")
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Configuration(_) => Some(
                "Set LINKUP_API_KEY and OPENAI_API_KEY in the environment or .env file."
                    .to_string(),
            ),
            Error::NoAttendeesFound { .. } => Some(
                "Try an event URL with a publicly visible speaker or attendee list.".to_string(),
            ),
            Error::ProfileUnresolved { .. } => {
                Some("Verify the company URL is correct and publicly reachable.".to_string())
            }
            Error::UpstreamService { .. } => {
                Some("The service may be temporarily unavailable; try again shortly.".to_string())
            }
            Error::MalformedResponse { .. } => {
                Some("Retry the analysis; the raw response is included for inspection.".to_string())
            }
            Error::InvalidRequest(_) => None,
        }
    }

    fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest(_) | Error::NoAttendeesFound { .. } | Error::ProfileUnresolved { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_attribution() {
        let err = Error::NoAttendeesFound {
            event: "https://example.com/e".to_string(),
        };
        assert_eq!(err.stage(), Stage::Discovery);
        assert_eq!(err.kind(), "no_attendees_found");
        assert!(err.is_user_correctable());

        let err = Error::upstream(Stage::Matching, "connection reset");
        assert_eq!(err.stage(), Stage::Matching);
        assert_eq!(err.to_string(), "matching upstream service error: connection reset");
        assert!(!err.is_user_correctable());
    }

    #[test]
    fn test_malformed_is_distinct_from_upstream() {
        let malformed = Error::MalformedResponse {
            stage: Stage::Matching,
            message: "expected value at line 1".to_string(),
            raw: "not json".to_string(),
        };
        assert_eq!(malformed.kind(), "malformed_response");
        assert_ne!(
            malformed.kind(),
            Error::upstream(Stage::Matching, "x").kind()
        );
    }

    #[test]
    fn test_suggestions() {
        let err = Error::Configuration("OPENAI_API_KEY not set".to_string());
        assert!(err.suggestion().unwrap().contains("OPENAI_API_KEY"));
        assert!(err.user_message().contains("not configured"));

        let err = Error::ProfileUnresolved {
            company: "Acme".to_string(),
        };
        assert!(err.user_message().contains("Acme"));
        assert!(err.suggestion().is_some());
    }
}
