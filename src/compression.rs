//! Compression Module
//!
//! Compression schemes a file type can be stored with.

use std::io::Write;

use flate2::write::ZlibEncoder;
use serde::Deserialize;

use crate::error::{Result, StaticCacheError};

// == Compression ==
/// Compression applied to a cached payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Payload stored as read from disk
    #[default]
    None,
    /// Payload stored zlib-wrapped, sent as `Content-Encoding: deflate`
    Deflate,
}

impl Compression {
    /// Returns the Content-Encoding header value, or None for raw payloads.
    pub fn encoding_name(&self) -> Option<&'static str> {
        match self {
            Compression::None => None,
            Compression::Deflate => Some("deflate"),
        }
    }

    // == Apply ==
    /// Encodes `data` with this scheme.
    ///
    /// HTTP `deflate` is the zlib format (RFC 1950), not a bare deflate stream.
    pub fn apply(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(data),
            Compression::Deflate => {
                let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
                encoder
                    .write_all(&data)
                    .map_err(StaticCacheError::Compression)?;
                encoder.finish().map_err(StaticCacheError::Compression)
            }
        }
    }
}
