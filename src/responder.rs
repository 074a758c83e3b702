//! Responder Module
//!
//! Turns cache entries into HTTP responses.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::cache::CacheEntry;

// == Respond ==
/// Builds the response for `entry`.
///
/// Returns None for a negative entry so the request can continue to the
/// next stage. A positive entry is always sent whole with status 200.
pub fn respond(entry: &CacheEntry) -> Option<Response> {
    let asset = entry.asset()?;

    let mut response = Response::new(Body::from(asset.body()));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, asset.content_type().clone());
    if let Some(encoding) = asset.compression().encoding_name() {
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static(encoding));
    }
    if let Some(cache_control) = asset.cache_control() {
        headers.insert(header::CACHE_CONTROL, cache_control.clone());
    }

    Some(response)
}
