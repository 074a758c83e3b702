//! Configuration Module
//!
//! Handles loading the server configuration from environment variables.
//! The cache itself takes its options as a value; only the binary reads the
//! environment.

use std::env;
use std::path::PathBuf;

use crate::error::{Result, StaticCacheError};
use crate::options::CacheOptions;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory static files are served from, relative to the working directory
    pub root_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file with cache options
    pub options_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STATIC_ROOT` - Directory to serve (default: public)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATIC_CACHE_OPTIONS` - Path to a JSON options file (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root_dir: env::var("STATIC_ROOT")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            options_file: env::var("STATIC_CACHE_OPTIONS")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    // == Load Options ==
    /// Reads the cache options file, or returns the defaults when none is set.
    pub fn load_options(&self) -> Result<CacheOptions> {
        let Some(path) = &self.options_file else {
            return Ok(CacheOptions::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| {
            StaticCacheError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            StaticCacheError::Config(format!("cannot parse {}: {}", path.display(), e))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("public"),
            server_port: 3000,
            options_file: None,
        }
    }
}
