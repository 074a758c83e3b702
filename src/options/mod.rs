//! Options Module
//!
//! File type classification and per-type response configuration.

mod defaults;
mod file_type;
mod resolver;

// Re-export public types
pub use defaults::{builtin_table, DEFAULT_MAX_AGE, FALLBACK_COMPRESSION, FALLBACK_CONTENT_TYPE};
pub use file_type::classify;
pub use resolver::{CacheOptions, FileTypeConfig, FileTypeOverride, ResolvedOptions};
