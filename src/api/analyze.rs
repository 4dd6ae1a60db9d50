//! Analysis endpoint

use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use leadscout_core::{AnalysisRequest, Error, Report};
use std::sync::Arc;

async fn analyze(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<Report>, ApiError> {
    let Some(pipeline) = state.pipeline.as_ref() else {
        let reason = state
            .setup_error
            .clone()
            .unwrap_or_else(|| "API clients not initialized".to_string());
        return Err(Error::Configuration(reason).into());
    };

    let Json(request) = body.map_err(|e| Error::InvalidRequest(e.body_text()))?;
    let report = pipeline.run(&request).await?;
    Ok(Json(report))
}

/// Create analysis routes
pub fn analyze_routes() -> Router {
    Router::new().route("/api/analyze", post(analyze))
}
