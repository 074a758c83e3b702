//! API Handlers
//!
//! Handlers for requests the static cache passes through.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::middleware::StaticCache;
use crate::models::{ErrorResponse, HealthResponse};

/// Handler for GET /health
///
/// Only reached when no file named `health` exists under the root.
pub async fn health_handler(State(cache): State<StaticCache>) -> Json<HealthResponse> {
    let stats = cache.stats().await;
    Json(HealthResponse::healthy(&stats))
}

/// Fallback for requests with no file behind them.
pub async fn not_found_handler(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("Not found: {}", uri.path()))),
    )
}
