//! HTTP error mapping
//!
//! Every pipeline error becomes `{error, kind, stage?, suggestion?, raw_response?}`
//! with a status chosen by error kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use leadscout_core::{Error, Stage, UserFriendlyError};
use serde::Serialize;
use tracing::warn;

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// A pipeline error on its way to the client
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code for the wrapped error
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidRequest(_)
            | Error::NoAttendeesFound { .. }
            | Error::ProfileUnresolved { .. } => StatusCode::BAD_REQUEST,
            Error::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::UpstreamService { .. } | Error::MalformedResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let stage = match self.0.stage() {
            Stage::Setup => None,
            stage => Some(stage),
        };
        let raw_response = match &self.0 {
            Error::MalformedResponse { raw, .. } => Some(raw.clone()),
            _ => None,
        };

        ErrorBody {
            error: self.0.user_message(),
            kind: self.0.kind(),
            stage,
            suggestion: self.0.suggestion(),
            raw_response,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(kind = self.0.kind(), error = %self.0, "analysis failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (Error::NoAttendeesFound { event: "e".into() }, StatusCode::BAD_REQUEST),
            (Error::ProfileUnresolved { company: "c".into() }, StatusCode::BAD_REQUEST),
            (Error::Configuration("k".into()), StatusCode::SERVICE_UNAVAILABLE),
            (
                Error::UpstreamService { stage: Stage::Matching, message: "m".into() },
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_malformed_body_carries_raw_text() {
        let body = ApiError(Error::MalformedResponse {
            stage: Stage::Matching,
            message: "invalid JSON".into(),
            raw: "not json".into(),
        })
        .body();

        assert_eq!(body.kind, "malformed_response");
        assert_eq!(body.stage, Some(Stage::Matching));
        assert_eq!(body.raw_response.as_deref(), Some("not json"));
    }

    #[test]
    fn test_setup_errors_have_no_stage() {
        let body = ApiError(Error::Configuration("OPENAI_API_KEY not set".into())).body();
        assert!(body.stage.is_none());
        assert!(body.suggestion.is_some());
    }
}
