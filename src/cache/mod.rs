//! Cache Module
//!
//! Write-once, in-memory storage of loaded static assets.
//!
//! There is no eviction and no expiry: entries live as long as the store.
//! A bounded variant would add eviction here, behind `CacheStore`.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CachedAsset};
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::CacheStore;
