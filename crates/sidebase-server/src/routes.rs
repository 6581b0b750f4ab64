//! HTTP route definitions.
//!
//! ```text
//! POST /api/extract-keywords - keyword extraction (JSON, 5 MB body limit)
//! GET  /api/search?q=        - streaming relay (Server-Sent Events)
//! GET  /health               - liveness check
//! ```

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::extract::extract_keywords;
use crate::search::search_stream;
use crate::state::AppState;

/// Maximum JSON body size; page text can be large.
pub const BODY_LIMIT_BYTES: usize = 5 * 1024 * 1024;

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/extract-keywords", post(extract_keywords))
        .route("/api/search", get(search_stream))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
