//! Cache Store Module
//!
//! Process-lifetime map from cache key to immutable entry.
//!
//! Entries are written once per key and never replaced, evicted or expired;
//! the store only grows. Each key owns a slot that doubles as a single-flight
//! guard: the first request for an uncached key populates it and concurrent
//! requests for the same key await that population. Population runs on its
//! own task, so it completes even if the request that started it is dropped.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, RwLock};

use crate::cache::{CacheEntry, CacheKey, CacheStats};
use crate::error::{Result, StaticCacheError};

type Slot = Arc<OnceCell<Arc<CacheEntry>>>;

// == Cache Store ==
/// Write-once cache storage with per-key single-flight population.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Slots by key; a slot is empty until its first population succeeds
    slots: RwLock<HashMap<CacheKey, Slot>>,
    /// Performance statistics, shared with population tasks
    stats: Arc<Mutex<CacheStats>>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the entry for `key` if it has been populated.
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let slots = self.slots.read().await;
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    // == Put ==
    /// Stores `entry` under `key` if the key has no entry yet.
    ///
    /// Returns false and leaves the existing entry in place otherwise.
    pub async fn put(&self, key: CacheKey, entry: CacheEntry) -> bool {
        let slot = self.slot(&key).await;
        slot.set(Arc::new(entry)).is_ok()
    }

    // == Get Or Populate ==
    /// Returns the entry for `key`, running `populate` if there is none.
    ///
    /// Only one `populate` runs per key at a time. If it fails the error is
    /// returned, nothing is stored, and the next caller runs it again.
    /// `populate` runs on a spawned task: cancelling the caller does not
    /// cancel it, and later callers wait for its result instead of loading
    /// again.
    pub async fn get_or_populate<F, Fut>(&self, key: &CacheKey, populate: F) -> Result<Arc<CacheEntry>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<CacheEntry>> + Send + 'static,
    {
        if let Some(entry) = self.get(key).await {
            self.stats.lock().await.record_hit();
            return Ok(entry);
        }

        let slot = self.slot(key).await;
        let stats = self.stats.clone();

        let task = tokio::spawn(async move {
            let mut populated = false;
            let result = slot
                .get_or_try_init(|| {
                    populated = true;
                    async move { populate().await.map(Arc::new) }
                })
                .await
                .cloned();

            let mut stats = stats.lock().await;
            match &result {
                Ok(entry) if populated => {
                    stats.record_miss();
                    if !entry.is_found() {
                        stats.record_not_found();
                    }
                }
                // Another task populated the slot while this one waited
                Ok(_) => stats.record_hit(),
                Err(_) => {
                    stats.record_miss();
                    stats.record_load_failure();
                }
            }

            result
        });

        task.await
            .map_err(|e| StaticCacheError::Internal(format!("population task failed: {}", e)))?
    }

    /// Returns the slot for `key`, creating an empty one if needed.
    async fn slot(&self, key: &CacheKey) -> Slot {
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(key) {
                return slot.clone();
            }
        }

        let mut slots = self.slots.write().await;
        slots.entry(key.clone()).or_default().clone()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        let mut stats = self.stats.lock().await.clone();
        stats.set_total_entries(total_entries);
        stats
    }

    // == Length ==
    /// Returns the number of populated entries, positive and negative.
    pub async fn len(&self) -> usize {
        let slots = self.slots.read().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
