//! Server initialization
//!
//! Loads configuration, wires providers into an `AppState` and serves the
//! API until Ctrl+C or SIGTERM.

use super::config::AppConfig;
use super::loader::load_config;
use super::providers::{build_llm, build_search};
use crate::api::{api_router, AppState};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use leadscout_core::Pipeline;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// Directory served under `/static`
const STATIC_DIR: &str = "static";

/// Build shared state; missing credentials leave the pipeline unset
fn build_state(config: &AppConfig) -> AppState {
    let search = build_search(&config.search);
    let llm = build_llm(&config.llm);

    let mut state = AppState {
        pipeline: None,
        setup_error: None,
        search_configured: search.is_ok(),
        llm_configured: llm.is_ok(),
    };

    match (search, llm) {
        (Ok(search), Ok(llm)) => {
            let pipeline = Pipeline::new(search, llm, &config.pipeline_settings());
            state.pipeline = Some(Arc::new(pipeline));
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("{e}; /api/analyze will answer 503 until credentials are set");
            state.setup_error = Some(e.to_string());
        }
    }

    state
}

/// Full application router: API, static files, tracing and CORS
fn build_app(state: AppState) -> Router {
    let app = api_router(Arc::new(state));

    let static_dir = Path::new(STATIC_DIR);
    let app = if static_dir.is_dir() {
        info!("Serving static files from {}", static_dir.display());
        app.nest_service("/static", ServeDir::new(static_dir))
            .route("/", get(|| async { axum::response::Redirect::temporary("/static/index.html") }))
    } else {
        app.route("/", get(|| async { "Leadscout event lead finder" }))
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server
pub async fn run() -> Result<()> {
    let config = load_config()?;
    info!("Starting Leadscout v{}", env!("CARGO_PKG_VERSION"));

    let state = build_state(&config);
    info!(
        search_configured = state.search_configured,
        llm_configured = state.llm_configured,
        "providers initialized"
    );

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Leadscout shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
