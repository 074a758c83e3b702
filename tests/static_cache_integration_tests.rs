//! Integration Tests for the Static Cache
//!
//! Drives the full router with real files in a temporary directory and with
//! a counting file source to observe filesystem access.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use flate2::read::ZlibDecoder;
use serde_json::Value;
use static_cache::{
    api::create_router, CacheOptions, FileSource, FileTypeOverride, StaticCache,
};
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

fn write_file(dir: &TempDir, relative: &str, contents: &[u8]) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn create_test_app(dir: &TempDir, options: CacheOptions) -> (Router, StaticCache) {
    let cache = StaticCache::new(dir.path(), options).unwrap();
    (create_router(cache.clone()), cache)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

/// File source over a fixed set of files that counts every call
struct CountingSource {
    files: HashMap<PathBuf, Vec<u8>>,
    exists_calls: AtomicUsize,
    read_calls: AtomicUsize,
    read_delay: Duration,
}

impl CountingSource {
    fn new(root: &Path, files: &[(&str, &[u8])]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, body)| (root.join(path), body.to_vec()))
                .collect(),
            exists_calls: AtomicUsize::new(0),
            read_calls: AtomicUsize::new(0),
            read_delay: Duration::ZERO,
        }
    }

    fn total_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst) + self.read_calls.load(Ordering::SeqCst)
    }
}

impl FileSource for CountingSource {
    fn exists(&self, path: &Path) -> bool {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.read_delay);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "vanished"))
    }
}

/// Reports every file as present but fails the first `failures` reads
struct FlakySource {
    remaining_failures: AtomicUsize,
}

impl FileSource for FlakySource {
    fn exists(&self, _path: &Path) -> bool {
        true
    }

    fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            Err(io::Error::new(io::ErrorKind::NotFound, "removed after check"))
        } else {
            Ok(b"recovered".to_vec())
        }
    }
}

// == Scenario Tests ==

#[tokio::test]
async fn test_css_is_deflated_with_default_headers() {
    let dir = tempfile::tempdir().unwrap();
    let css = "body { margin: 0; padding: 0; }\n".repeat(37);
    write_file(&dir, "css/app.css", css.as_bytes());
    let (app, _) = create_test_app(&dir, CacheOptions::default());

    let (status, headers, body) = get(&app, "/css/app.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/css");
    assert_eq!(headers[header::CONTENT_ENCODING], "deflate");
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=1209600");
    assert_eq!(inflate(&body), css.as_bytes());
}

#[tokio::test]
async fn test_repeated_request_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "css/app.css", b"h1 { color: blue; }");
    let (app, cache) = create_test_app(&dir, CacheOptions::default());

    let first = get(&app, "/css/app.css").await;
    let second = get(&app, "/css/app.css").await;

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[tokio::test]
async fn test_second_request_performs_no_filesystem_access() {
    let root = PathBuf::from("/srv/site");
    let source = Arc::new(CountingSource::new(&root, &[("css/app.css", b"a{}")]));
    let cache = StaticCache::with_source(&root, CacheOptions::default(), source.clone()).unwrap();
    let app = create_router(cache);

    get(&app, "/css/app.css").await;
    let calls = source.total_calls();
    assert_eq!(calls, 2);

    get(&app, "/css/app.css").await;
    get(&app, "/css/app.css").await;
    assert_eq!(source.total_calls(), calls);
}

#[tokio::test]
async fn test_png_is_served_raw() {
    let dir = tempfile::tempdir().unwrap();
    let png: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    write_file(&dir, "img/logo.png", png);
    let (app, _) = create_test_app(&dir, CacheOptions::default());

    let (status, headers, body) = get(&app, "/img/logo.png").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert!(headers.get(header::CONTENT_ENCODING).is_none());
    assert_eq!(body, png);
}

#[tokio::test]
async fn test_missing_file_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let (app, cache) = create_test_app(&dir, CacheOptions::default());

    let (status, headers, body) = get(&app, "/missing/file.txt").await;

    // Answered by the fallback route, not by the cache
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(headers.get(header::CACHE_CONTROL).is_none());
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("/missing/file.txt"));

    assert_eq!(cache.stats().await.not_found, 1);
}

#[tokio::test]
async fn test_per_type_max_age_override() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "a.jpg", b"\xff\xd8\xff");
    let options =
        CacheOptions::new().with_type("jpg", FileTypeOverride::default().with_max_age(3600));
    let (app, _) = create_test_app(&dir, options);

    let (_, headers, _) = get(&app, "/a.jpg").await;

    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=3600");
}

#[tokio::test]
async fn test_query_variants_populate_separately() {
    let root = PathBuf::from("/srv/site");
    let source = Arc::new(CountingSource::new(&root, &[("a.jpg", b"\xff\xd8\xff")]));
    let cache = StaticCache::with_source(&root, CacheOptions::default(), source.clone()).unwrap();
    let app = create_router(cache.clone());

    let (_, first, _) = get(&app, "/a.jpg?v=2").await;
    let (_, second, _) = get(&app, "/a.jpg?v=3").await;

    assert_eq!(first[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(second[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(source.read_calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len().await, 2);
}

// == Behavior Tests ==

#[tokio::test]
async fn test_negative_entry_is_permanent() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = create_test_app(&dir, CacheOptions::default());

    let (status, _, _) = get(&app, "/late.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    write_file(&dir, "late.css", b"p {}");

    let (status, _, _) = get(&app, "/late.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cached_bytes_survive_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "data.json", br#"{"v":1}"#);
    let (app, _) = create_test_app(&dir, CacheOptions::default());

    let (_, _, first) = get(&app, "/data.json").await;
    write_file(&dir, "data.json", br#"{"v":2}"#);
    let (_, _, second) = get(&app, "/data.json").await;

    assert_eq!(inflate(&first), br#"{"v":1}"#);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_and_missing_extensions_use_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "notes.txt", b"plain notes");
    write_file(&dir, "LICENSE", b"MIT License");
    let (app, _) = create_test_app(&dir, CacheOptions::default());

    for (uri, contents) in [("/notes.txt", &b"plain notes"[..]), ("/LICENSE", &b"MIT License"[..])] {
        let (status, headers, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
        assert_eq!(headers[header::CONTENT_ENCODING], "deflate");
        assert_eq!(inflate(&body), contents);
    }
}

#[tokio::test]
async fn test_fallback_overrides_apply_to_unknown_types() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "blob.bin", b"\x00\x01\x02");
    let options = CacheOptions::new()
        .with_default_content_type("application/octet-stream")
        .with_default_compression(static_cache::Compression::None);
    let (app, _) = create_test_app(&dir, options);

    let (_, headers, body) = get(&app, "/blob.bin").await;

    assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
    assert!(headers.get(header::CONTENT_ENCODING).is_none());
    assert_eq!(body, b"\x00\x01\x02");
}

#[tokio::test]
async fn test_zero_global_max_age_omits_cache_control() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "index.html", b"<html></html>");
    let (app, _) = create_test_app(&dir, CacheOptions::new().with_max_age(0));

    let (_, headers, _) = get(&app, "/index.html").await;

    assert_eq!(headers[header::CONTENT_TYPE], "text/html");
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_options_loaded_from_json() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "photo.JPEG", b"\xff\xd8\xff");
    let options: CacheOptions =
        serde_json::from_str(r#"{"maxAge": 60, "jpeg": {"maxAge": 120}}"#).unwrap();
    let (app, _) = create_test_app(&dir, options);

    let (_, headers, _) = get(&app, "/photo.JPEG").await;

    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=120");
}

#[tokio::test]
async fn test_read_failure_is_server_error_and_not_cached() {
    let source = Arc::new(FlakySource {
        remaining_failures: AtomicUsize::new(1),
    });
    let cache =
        StaticCache::with_source("/srv/site", CacheOptions::default(), source).unwrap();
    let app = create_router(cache.clone());

    let (status, _, body) = get(&app, "/report.csv").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("report.csv"));
    assert_eq!(cache.len().await, 0);

    // The next request retries the whole load
    let (status, headers, body) = get(&app, "/report.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(inflate(&body), b"recovered");

    let stats = cache.stats().await;
    assert_eq!(stats.load_failures, 1);
    assert_eq!(stats.total_entries, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_requests_load_once() {
    let root = PathBuf::from("/srv/site");
    let mut source = CountingSource::new(&root, &[("bundle.js", b"console.log('hi');")]);
    source.read_delay = Duration::from_millis(100);
    let source = Arc::new(source);
    let cache = StaticCache::with_source(&root, CacheOptions::default(), source.clone()).unwrap();
    let app = create_router(cache.clone());

    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { get(&app, "/bundle.js").await }));
    }

    let mut bodies = Vec::new();
    for handle in handles {
        let (status, headers, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/javascript");
        bodies.push(body);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(source.exists_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.read_calls.load(Ordering::SeqCst), 1);

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 19);
}

#[tokio::test]
async fn test_health_reports_cache_stats() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "style.css", b"a {}");
    let (app, _) = create_test_app(&dir, CacheOptions::default());

    get(&app, "/style.css").await;
    let (status, _, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    // `/style.css` and the negative entry for `/health` itself
    assert_eq!(json["cached_entries"], 2);
}
