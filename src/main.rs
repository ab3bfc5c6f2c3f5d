//! Ordinals Dashboard Server
//!
//! Run with: cargo run --bin ordinals-dashboard
//!
//! # Configuration
//!
//! Read from `ORDINALS_CONFIG` if set, otherwise from the default config
//! locations. Environment variables override file values:
//! - `ORDINALS_SOURCE_URL`: Default feed URL
//! - `ORDINALS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `ORDINALS_API_PORT`: Port to listen on (default: 8501)
//! - `ORDINALS_LOG_LEVEL` / `ORDINALS_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, overrides the level

use ordinals_dashboard::api::{serve, AppState};
use ordinals_dashboard::config::Config;
use ordinals_dashboard::logging;
use ordinals_dashboard::source::HttpSource;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("ORDINALS_CONFIG").ok().map(PathBuf::from);
    let config = Config::resolve(config_path.as_deref())?;

    logging::init(&config.logging);

    tracing::info!("Starting Ordinals Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Default feed: {}", config.source.default_url);
    tracing::info!(
        "Window: {}h, embed archive: {}",
        config.dashboard.window_hours,
        config.dashboard.embed_archive
    );

    let source = Arc::new(HttpSource::new(&config.source)?);
    let state = AppState::new(source, &config);

    serve(state, &config.api).await?;

    tracing::info!("Ordinals Dashboard stopped");
    Ok(())
}
