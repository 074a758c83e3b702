//! Loader Module
//!
//! Builds cache entries from files on disk when a key is first requested.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, CachedAsset};
use crate::error::{Result, StaticCacheError};
use crate::options::{classify, ResolvedOptions};

// == File Source ==
/// Filesystem access used by the loader.
///
/// Calls are blocking; the loader is run on the blocking thread pool.
pub trait FileSource: Send + Sync + 'static {
    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// `FileSource` backed by the local filesystem.
///
/// Directories count as absent, so a request for one passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSource;

impl FileSource for DiskSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

// == Loader ==
/// Resolves request paths under a root directory and loads them.
#[derive(Clone)]
pub struct Loader {
    /// Working directory joined with the root directory
    base: PathBuf,
    options: Arc<ResolvedOptions>,
    source: Arc<dyn FileSource>,
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("base", &self.base)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Loader {
    // == Constructor ==
    /// Creates a loader serving files below `base`.
    pub fn new(base: PathBuf, options: Arc<ResolvedOptions>, source: Arc<dyn FileSource>) -> Self {
        Self {
            base,
            options,
            source,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    // == Resolve Path ==
    /// Maps a raw request path to a filesystem path and the file name used
    /// for classification.
    ///
    /// Query string and fragment are cut from the final segment only.
    /// Segments are not sanitized: `..` is passed through to the filesystem.
    pub fn resolve_path(&self, request_path: &str) -> (PathBuf, String) {
        let trimmed = request_path.strip_prefix('/').unwrap_or(request_path);
        let mut segments: Vec<&str> = trimmed.split('/').collect();

        let mut file_name = segments.pop().unwrap_or_default();
        if let Some(index) = file_name.find('?') {
            file_name = &file_name[..index];
        }
        if let Some(index) = file_name.find('#') {
            file_name = &file_name[..index];
        }

        let mut path = self.base.clone();
        for segment in segments.into_iter().chain(std::iter::once(file_name)) {
            if !segment.is_empty() {
                path.push(segment);
            }
        }

        (path, file_name.to_string())
    }

    // == Load ==
    /// Loads `request_path` into a new cache entry.
    ///
    /// A path with nothing behind it yields `CacheEntry::Missing`. A file that
    /// exists but cannot be read is an error.
    pub fn load(&self, request_path: &str) -> Result<CacheEntry> {
        let (path, file_name) = self.resolve_path(request_path);

        if !self.source.exists(&path) {
            debug!("No file at {}, caching negative entry", path.display());
            return Ok(CacheEntry::Missing);
        }

        let file_type = classify(&file_name);
        let content_type = self.options.content_type(file_type.as_deref());
        let compression = self.options.compression(file_type.as_deref());
        let max_age = self.options.max_age(file_type.as_deref());

        let raw = self
            .source
            .read(&path)
            .map_err(|source| StaticCacheError::Read {
                path: path.clone(),
                source,
            })?;
        let raw_len = raw.len();
        let body = compression.apply(raw)?;
        let asset = CachedAsset::new(file_type, content_type, compression, body, max_age)?;

        debug!(
            "Loaded {} as {} ({:?}, {} bytes, {} stored, max-age {:?})",
            path.display(),
            asset.file_type().unwrap_or("untyped"),
            asset.compression(),
            raw_len,
            asset.body().len(),
            asset.max_age()
        );

        Ok(CacheEntry::Found(asset))
    }
}
