//! Health check endpoint

use super::AppState;
use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub search_configured: bool,
    pub llm_configured: bool,
}

async fn health_check(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        search_configured: state.search_configured,
        llm_configured: state.llm_configured,
    })
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new().route("/api/health", get(health_check))
}
