//! Response DTOs for the demo server
//!
//! Defines the structure of outgoing JSON bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Cached entries, positive and negative
    pub cached_entries: usize,
    /// Cache hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(stats: &CacheStats) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cached_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Error response body for requests nothing could answer
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
