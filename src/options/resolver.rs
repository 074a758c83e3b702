//! Config Resolver
//!
//! Merges caller overrides with the built-in table into an immutable
//! per-type configuration, built once when the cache is constructed.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::defaults::{builtin_table, DEFAULT_MAX_AGE, FALLBACK_COMPRESSION, FALLBACK_CONTENT_TYPE};
use super::file_type::canonicalize;
use crate::compression::Compression;

// == File Type Config ==
/// Effective response settings for one file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeConfig {
    /// Value of the Content-Type header
    pub content_type: String,
    /// Compression applied to the stored payload
    pub compression: Compression,
    /// Type-specific max age in seconds; None or 0 defers to the global value
    pub max_age: Option<u64>,
}

// == File Type Override ==
/// Caller-supplied changes to one file type. Omitted fields are inherited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTypeOverride {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub compression: Option<Compression>,
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl FileTypeOverride {
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Applies this override on top of `base`.
    fn overlay(self, base: FileTypeConfig) -> FileTypeConfig {
        FileTypeConfig {
            content_type: self.content_type.unwrap_or(base.content_type),
            compression: self.compression.unwrap_or(base.compression),
            max_age: self.max_age.or(base.max_age),
        }
    }
}

// == Cache Options ==
/// Caller-supplied options.
///
/// Deserializes from the shape `{"maxAge": 3600, "jpg": {"maxAge": 60}}`:
/// every key that is not a global field names a file type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    /// Global max age in seconds; 0 disables Cache-Control
    #[serde(default)]
    pub max_age: Option<u64>,
    /// Content type for unknown or extension-less files
    #[serde(default)]
    pub default_content_type: Option<String>,
    /// Compression for unknown or extension-less files
    #[serde(default)]
    pub default_compression: Option<Compression>,
    /// Per-type overrides keyed by type token
    #[serde(flatten, deserialize_with = "lenient_overrides")]
    pub types: BTreeMap<String, FileTypeOverride>,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = Some(content_type.into());
        self
    }

    pub fn with_default_compression(mut self, compression: Compression) -> Self {
        self.default_compression = Some(compression);
        self
    }

    /// Adds an override for `file_type`, replacing any earlier one for it.
    pub fn with_type(mut self, file_type: impl Into<String>, config: FileTypeOverride) -> Self {
        self.types.insert(file_type.into(), config);
        self
    }
}

/// Keeps well-formed per-type overrides and skips the rest.
fn lenient_overrides<'de, D>(deserializer: D) -> Result<BTreeMap<String, FileTypeOverride>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .filter_map(|(file_type, value)| {
            match serde_json::from_value::<FileTypeOverride>(value) {
                Ok(config) => Some((file_type, config)),
                Err(e) => {
                    warn!("Ignoring malformed options for type '{}': {}", file_type, e);
                    None
                }
            }
        })
        .collect())
}

// == Resolved Options ==
/// Effective configuration of a running cache. Read-only after construction.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    types: BTreeMap<String, FileTypeConfig>,
    max_age: u64,
    fallback_content_type: String,
    fallback_compression: Compression,
}

impl ResolvedOptions {
    // == Resolve ==
    /// Overlays `options` on the built-in table, field by field.
    ///
    /// Override keys are canonicalized like file extensions, so `JPEG`
    /// configures `jpg`. A key outside the built-in table adds a new type whose
    /// missing fields take the unknown-type fallbacks.
    pub fn resolve(options: CacheOptions) -> Self {
        let fallback_content_type = options
            .default_content_type
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        let fallback_compression = options.default_compression.unwrap_or(FALLBACK_COMPRESSION);

        let mut types = builtin_table();
        for (file_type, config) in options.types {
            let key = canonicalize(&file_type);
            let base = types.remove(&key).unwrap_or_else(|| FileTypeConfig {
                content_type: fallback_content_type.clone(),
                compression: fallback_compression,
                max_age: None,
            });
            types.insert(key, config.overlay(base));
        }

        Self {
            types,
            max_age: options.max_age.unwrap_or(DEFAULT_MAX_AGE),
            fallback_content_type,
            fallback_compression,
        }
    }

    /// Returns the configuration of a known type.
    pub fn get(&self, file_type: Option<&str>) -> Option<&FileTypeConfig> {
        file_type.and_then(|t| self.types.get(t))
    }

    // == Lookups ==
    /// Content type for `file_type`; the fallback when unknown or None.
    pub fn content_type(&self, file_type: Option<&str>) -> &str {
        self.get(file_type)
            .map(|config| config.content_type.as_str())
            .unwrap_or(&self.fallback_content_type)
    }

    /// Compression for `file_type`; the fallback when unknown or None.
    pub fn compression(&self, file_type: Option<&str>) -> Compression {
        self.get(file_type)
            .map(|config| config.compression)
            .unwrap_or(self.fallback_compression)
    }

    /// Effective max age for `file_type`.
    ///
    /// A non-zero per-type value wins, otherwise the global value applies.
    /// Returns None when the result is 0, meaning no Cache-Control header.
    pub fn max_age(&self, file_type: Option<&str>) -> Option<u64> {
        let age = self
            .get(file_type)
            .and_then(|config| config.max_age)
            .filter(|age| *age != 0)
            .unwrap_or(self.max_age);
        (age != 0).then_some(age)
    }

    /// Global max age in seconds.
    pub fn default_max_age(&self) -> u64 {
        self.max_age
    }

    /// Iterates over every configured type token.
    pub fn file_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self::resolve(CacheOptions::default())
    }
}
