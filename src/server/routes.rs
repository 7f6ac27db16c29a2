//! Axum router configuration

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

use super::handlers::{extract_subtitles, health_check};
use super::AppState;

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>, config: &Config) -> Result<Router> {
    let cors = cors_layer(&config.server.allowed_origins)?;

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/extract", post(extract_subtitles))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state);

    Ok(router)
}

/// Any origin when `allowed_origins` is empty, otherwise exactly the listed ones
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim_end_matches('/'))
                    .with_context(|| format!("Invalid allowed origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
