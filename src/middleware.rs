//! Static Cache Middleware
//!
//! Entry point for each request: derive the key, load on first access,
//! answer from memory or hand the request on.
//!
//! # Usage
//! ```ignore
//! let cache = StaticCache::new("public", CacheOptions::default())?;
//! let app = Router::new()
//!     .fallback(not_found_handler)
//!     .layer(axum::middleware::from_fn_with_state(cache, serve_cached));
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheKey, CacheStats, CacheStore};
use crate::error::{Result, StaticCacheError};
use crate::loader::{DiskSource, FileSource, Loader};
use crate::options::{CacheOptions, ResolvedOptions};
use crate::responder::respond;

// == Static Cache ==
/// Cache of static assets below one root directory.
///
/// Cheap to clone; clones share the same store. Entries are kept for the
/// lifetime of the last clone.
#[derive(Clone, Debug)]
pub struct StaticCache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: CacheStore,
    loader: Loader,
    options: Arc<ResolvedOptions>,
}

impl StaticCache {
    // == Constructor ==
    /// Creates a cache serving files from `root`, relative to the current
    /// working directory unless absolute.
    pub fn new(root: impl AsRef<Path>, options: CacheOptions) -> Result<Self> {
        Self::with_source(root, options, Arc::new(DiskSource))
    }

    /// Creates a cache reading files through `source`.
    pub fn with_source(
        root: impl AsRef<Path>,
        options: CacheOptions,
        source: Arc<dyn FileSource>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(StaticCacheError::WorkingDirectory)?;
        let base: PathBuf = cwd.join(root);
        let options = Arc::new(ResolvedOptions::resolve(options));
        let loader = Loader::new(base, options.clone(), source);

        Ok(Self {
            inner: Arc::new(Inner {
                store: CacheStore::new(),
                loader,
                options,
            }),
        })
    }

    // == Entry ==
    /// Returns the entry for a raw request path, loading it on first access.
    ///
    /// Concurrent first requests for the same path share one load.
    pub async fn entry(&self, request_path: &str) -> Result<Arc<CacheEntry>> {
        let key = CacheKey::derive(request_path);
        let loader = self.inner.loader.clone();
        let request_path = request_path.to_string();

        self.inner
            .store
            .get_or_populate(&key, move || async move {
                debug!("Cache miss for {}, loading", request_path);
                tokio::task::spawn_blocking(move || loader.load(&request_path))
                    .await
                    .map_err(|e| StaticCacheError::Internal(e.to_string()))?
            })
            .await
    }

    // == Handle ==
    /// Returns the cached response for `request_path`, or None when no file
    /// exists there.
    pub async fn handle(&self, request_path: &str) -> Result<Option<Response>> {
        let entry = self.entry(request_path).await?;
        Ok(respond(&entry))
    }

    /// Effective options this cache was built with.
    pub fn options(&self) -> &ResolvedOptions {
        &self.inner.options
    }

    /// Directory files are served from.
    pub fn base_dir(&self) -> &Path {
        self.inner.loader.base()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.store.stats().await
    }

    /// Number of cached entries, positive and negative.
    pub async fn len(&self) -> usize {
        self.inner.store.len().await
    }
}

// == Middleware ==
/// Axum middleware answering requests from the cache.
///
/// Use with `axum::middleware::from_fn_with_state`. The raw path and query
/// of the request select the entry; requests with no file behind them are
/// passed to `next`.
pub async fn serve_cached(
    State(cache): State<StaticCache>,
    request: Request,
    next: Next,
) -> std::result::Result<Response, StaticCacheError> {
    let request_path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match cache.handle(&request_path).await {
        Ok(Some(response)) => Ok(response),
        Ok(None) => Ok(next.run(request).await),
        Err(e) => {
            warn!("Failed to load {}: {}", request_path, e);
            Err(e)
        }
    }
}
