//! Cache Key Module
//!
//! Derives store keys from raw request paths.

use std::fmt;

// == Cache Key ==
/// Key of a cache slot.
///
/// Built from the raw request path including query string and fragment, so
/// `/a.jpg?v=1` and `/a.jpg?v=2` occupy different slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    // == Derive ==
    /// Replaces every `/` in `path` with `-`. No other normalization.
    ///
    /// The mapping is not injective: `/a/b.css` and `/a-b.css` share the key
    /// `-a-b.css`, and whichever is requested first is served for both.
    pub fn derive(path: &str) -> Self {
        Self(path.replace('/', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
