//! API Module
//!
//! Router for the demo server: the static cache answers first, everything it
//! passes on reaches these routes.
//!
//! # Endpoints
//! - `GET /health` - Health check with cache statistics
//! - anything else - JSON 404

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
