//! Static Cache - demo server
//!
//! Serves a directory through the static cache, with a JSON 404 behind it.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use static_cache::{api::create_router, Config, StaticCache};

/// Main entry point for the static cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Resolve cache options and create the cache
/// 4. Create Axum router with the cache in front
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "static_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Static Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: root={}, port={}, options_file={:?}",
        config.root_dir.display(),
        config.server_port,
        config.options_file
    );

    let options = config.load_options()?;
    let cache = StaticCache::new(&config.root_dir, options)?;
    info!(
        "Static cache initialized: serving {} ({} file types, default max-age {}s)",
        cache.base_dir().display(),
        cache.options().file_types().count(),
        cache.options().default_max_age()
    );

    let app = create_router(cache.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let stats = cache.stats().await;
    info!(
        "Server shutdown complete: {} entries cached, {} hits, {} misses",
        stats.total_entries, stats.hits, stats.misses
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
