//! HTTP server module
//!
//! - Axum router with the extraction endpoint
//! - Request handlers and the JSON error body
//! - CORS and request tracing middleware

pub mod handlers;
pub mod routes;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::transcript::TranscriptPipeline;

pub use routes::create_router;

/// Shared, read-only application state
pub struct AppState {
    pub pipeline: TranscriptPipeline,
}

impl AppState {
    pub fn new(pipeline: TranscriptPipeline) -> Self {
        Self { pipeline }
    }
}

/// Bind the configured address and serve until the process is stopped
pub async fn serve(config: &Config, state: Arc<AppState>) -> Result<()> {
    let app = create_router(state, config)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Starting HTTP server on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
