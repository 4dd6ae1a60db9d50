//! Web API module for Leadscout
//!
//! - `POST /api/analyze`: run the pipeline for one event and company
//! - `GET /api/health`: version and provider configuration

pub mod analyze;
pub mod error;
pub mod health;

use axum::extract::Extension;
use axum::Router;
use leadscout_core::Pipeline;
use std::sync::Arc;

pub use analyze::analyze_routes;
pub use health::health_routes;

/// State shared by every handler
pub struct AppState {
    /// Absent when a credential is missing
    pub pipeline: Option<Arc<Pipeline>>,
    /// Why the pipeline is absent
    pub setup_error: Option<String>,
    pub search_configured: bool,
    pub llm_configured: bool,
}

/// Create the API router
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(analyze_routes())
        .layer(Extension(state))
}
