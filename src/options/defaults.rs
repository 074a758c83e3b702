//! Built-in Defaults
//!
//! The shipped per-type table and the fallbacks for unknown types.

use std::collections::BTreeMap;

use super::resolver::FileTypeConfig;
use crate::compression::Compression;

/// Global max age in seconds (14 days)
pub const DEFAULT_MAX_AGE: u64 = 60 * 60 * 24 * 14;

/// Content type for unknown or extension-less files
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// Compression for unknown or extension-less files
pub const FALLBACK_COMPRESSION: Compression = Compression::Deflate;

const BUILTIN: &[(&str, &str, Compression)] = &[
    // Images
    ("bmp", "image/bmp", Compression::Deflate),
    ("jpg", "image/jpeg", Compression::None),
    ("png", "image/png", Compression::None),
    ("gif", "image/gif", Compression::None),
    ("ico", "image/x-icon", Compression::None),
    ("webp", "image/webp", Compression::None),
    ("svg", "image/svg+xml", Compression::Deflate),
    // Text and markup
    ("html", "text/html", Compression::Deflate),
    ("css", "text/css", Compression::Deflate),
    ("js", "application/javascript", Compression::Deflate),
    ("json", "application/json", Compression::Deflate),
    // Office documents
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Compression::Deflate,
    ),
    ("csv", "text/csv", Compression::Deflate),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Compression::Deflate,
    ),
    // Fonts
    ("woff", "font/woff", Compression::None),
    ("woff2", "font/woff2", Compression::None),
    ("otf", "font/opentype", Compression::None),
    ("ttf", "font/ttf", Compression::None),
    ("eot", "application/vnd.ms-fontobject", Compression::None),
    // Audio
    ("wav", "audio/x-wav", Compression::Deflate),
    ("mp3", "audio/mpeg3", Compression::None),
    ("mp4a", "audio/mp4", Compression::None),
    // Video
    ("mp4", "video/mp4", Compression::None),
    ("webm", "video/webm", Compression::None),
    ("avi", "video/x-msvideo", Compression::None),
    ("flv", "video/x-flv", Compression::None),
];

// == Builtin Table ==
/// Returns the built-in configuration keyed by type token.
///
/// No built-in type carries its own max age; all use the global default.
pub fn builtin_table() -> BTreeMap<String, FileTypeConfig> {
    BUILTIN
        .iter()
        .map(|(file_type, content_type, compression)| {
            (
                file_type.to_string(),
                FileTypeConfig {
                    content_type: content_type.to_string(),
                    compression: *compression,
                    max_age: None,
                },
            )
        })
        .collect()
}
