//! Static Cache - In-memory caching of static assets
//!
//! Loads each requested file from disk once, compresses it according to its
//! type, and serves every later request for the same path from memory.

pub mod api;
pub mod cache;
pub mod compression;
pub mod config;
pub mod error;
pub mod loader;
pub mod middleware;
pub mod models;
pub mod options;
pub mod responder;

pub use compression::Compression;
pub use config::Config;
pub use error::{Result, StaticCacheError};
pub use loader::{DiskSource, FileSource};
pub use middleware::{serve_cached, StaticCache};
pub use options::{CacheOptions, FileTypeOverride, ResolvedOptions};
