//! Error types for the static cache
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Static Cache Error Enum ==
/// Unified error type for the static cache.
///
/// A missing file is not an error: it is cached as a negative entry and the
/// request passes through to the next stage.
#[derive(Error, Debug)]
pub enum StaticCacheError {
    /// File passed the existence check but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deflate encoder failed
    #[error("Compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Configured value cannot be sent as a header
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Working directory could not be determined at construction
    #[error("Cannot determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// Options file could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Internal error (population task panicked or was cancelled)
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StaticCacheError {
    fn into_response(self) -> Response {
        // Every variant is a server-side failure; absent files never get here.
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the static cache.
pub type Result<T> = std::result::Result<T, StaticCacheError>;
