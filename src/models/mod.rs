//! Response models for the demo server
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! JSON bodies by the routes that sit behind the static cache.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse};
