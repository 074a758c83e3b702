//! Cache Entry Module
//!
//! Defines the immutable record stored for each cache key.

use axum::body::Bytes;
use axum::http::HeaderValue;

use crate::compression::Compression;
use crate::error::{Result, StaticCacheError};

// == Cache Entry ==
/// Outcome of loading one request path.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// The file existed and its payload is held in memory
    Found(CachedAsset),
    /// No file exists at the path; the request passes through
    Missing,
}

impl CacheEntry {
    /// Returns true for a positive entry.
    pub fn is_found(&self) -> bool {
        matches!(self, CacheEntry::Found(_))
    }

    /// Returns the asset of a positive entry.
    pub fn asset(&self) -> Option<&CachedAsset> {
        match self {
            CacheEntry::Found(asset) => Some(asset),
            CacheEntry::Missing => None,
        }
    }
}

// == Cached Asset ==
/// A loaded file together with the headers it is served with.
///
/// Header values are validated when the asset is built, so serving it
/// cannot fail.
#[derive(Debug, Clone)]
pub struct CachedAsset {
    file_type: Option<String>,
    content_type: HeaderValue,
    compression: Compression,
    body: Bytes,
    max_age: Option<u64>,
    cache_control: Option<HeaderValue>,
}

impl CachedAsset {
    // == Constructor ==
    /// Creates an asset from an already-encoded payload.
    ///
    /// # Arguments
    /// * `file_type` - Classified type token, None for extension-less files
    /// * `content_type` - Content-Type header value
    /// * `compression` - Scheme `body` is encoded with
    /// * `body` - Payload exactly as it will be sent
    /// * `max_age` - Cache-Control max-age in seconds, None for no header
    pub fn new(
        file_type: Option<String>,
        content_type: &str,
        compression: Compression,
        body: impl Into<Bytes>,
        max_age: Option<u64>,
    ) -> Result<Self> {
        let content_type = HeaderValue::from_str(content_type)
            .map_err(|_| StaticCacheError::InvalidHeader(content_type.to_string()))?;

        let cache_control = max_age
            .map(|age| {
                let value = format!("max-age={}", age);
                HeaderValue::from_str(&value).map_err(|_| StaticCacheError::InvalidHeader(value))
            })
            .transpose()?;

        Ok(Self {
            file_type,
            content_type,
            compression,
            body: body.into(),
            max_age,
            cache_control,
        })
    }

    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn content_type(&self) -> &HeaderValue {
        &self.content_type
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Returns the stored payload. Cloning `Bytes` does not copy it.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }

    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    pub fn cache_control(&self) -> Option<&HeaderValue> {
        self.cache_control.as_ref()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_creation() {
        let asset = CachedAsset::new(
            Some("png".to_string()),
            "image/png",
            Compression::None,
            vec![1u8, 2, 3],
            Some(60),
        )
        .unwrap();

        assert_eq!(asset.file_type(), Some("png"));
        assert_eq!(asset.content_type(), "image/png");
        assert_eq!(asset.compression(), Compression::None);
        assert_eq!(&asset.body()[..], &[1, 2, 3]);
        assert_eq!(asset.max_age(), Some(60));
        assert_eq!(asset.cache_control().unwrap(), "max-age=60");
    }

    #[test]
    fn test_asset_without_max_age_has_no_cache_control() {
        let asset =
            CachedAsset::new(None, "text/plain", Compression::Deflate, Vec::new(), None).unwrap();

        assert!(asset.cache_control().is_none());
        assert!(asset.file_type().is_none());
    }

    #[test]
    fn test_asset_rejects_invalid_content_type() {
        let result = CachedAsset::new(None, "text/plain\n", Compression::None, Vec::new(), None);
        assert!(matches!(result, Err(StaticCacheError::InvalidHeader(_))));
    }

    #[test]
    fn test_entry_accessors() {
        let asset =
            CachedAsset::new(None, "text/plain", Compression::None, Vec::new(), None).unwrap();
        let found = CacheEntry::Found(asset);

        assert!(found.is_found());
        assert!(found.asset().is_some());
        assert!(!CacheEntry::Missing.is_found());
        assert!(CacheEntry::Missing.asset().is_none());
    }
}
