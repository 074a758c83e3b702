//! API Routes
//!
//! Configures the Axum router with the static cache in front.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, not_found_handler};
use crate::middleware::{serve_cached, StaticCache};

/// Creates the main router.
///
/// # Middleware
/// - Static cache: answers every request that has a file behind it
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(cache: StaticCache) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(cache.clone(), serve_cached))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(cache)
}
