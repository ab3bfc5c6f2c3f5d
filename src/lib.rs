//! # Ordinals Dashboard
//!
//! The most viewed Ordinals inscriptions of the last 24 hours: fetch a feed,
//! keep what is recent, rank it by views, chart it and export it.
//!
//! ## Modules
//!
//! - [`inscription`]: the record type and feed decoding
//! - [`source`]: fetching feeds and images over HTTP
//! - [`pipeline`]: recency filter and view ranking
//! - [`charts`]: histogram, top-N and category aggregates
//! - [`export`]: CSV, ZIP and data-URI downloads
//! - [`dashboard`]: view model plus HTML and terminal rendering
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ordinals_dashboard::config::Config;
//! use ordinals_dashboard::dashboard::{render_text, Dashboard};
//! use ordinals_dashboard::source::{fetch_inscriptions, HttpSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let source = HttpSource::new(&config.source)?;
//!
//!     let url = &config.source.default_url;
//!     let outcome = fetch_inscriptions(&source, url).await;
//!     let dashboard = Dashboard::build(url, &outcome, &config.dashboard, chrono::Utc::now());
//!
//!     print!("{}", render_text(&dashboard, Some(10)));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod inscription;
pub mod logging;
pub mod pipeline;
pub mod source;

// Re-export top-level types for convenience
pub use inscription::{Inscription, RecordError};

pub use pipeline::{filter_and_sort, RecentWindow};

pub use charts::{CategoryShare, ChartSet, HistogramBin, ViewBar};

pub use source::{fetch_inscriptions, FetchOutcome, HttpSource, InscriptionSource, SourceError};

pub use export::{decode_csv, encode_csv, DownloadLink, ExportError, ImageArchive};

pub use dashboard::{Dashboard, DashboardStatus, Page};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoggingConfig, SourceConfig};
