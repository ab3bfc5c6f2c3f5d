//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use super::error::{ApiError, ApiResult};
use crate::config::{ApiConfig, Config, DashboardConfig};
use crate::source::InscriptionSource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where inscriptions and images are fetched from
    pub source: Arc<dyn InscriptionSource>,
    /// Feed used when a request names none
    pub default_url: Arc<str>,
    /// Window, chart and archive settings
    pub dashboard: Arc<DashboardConfig>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state from a source and the loaded configuration
    pub fn new(source: Arc<dyn InscriptionSource>, config: &Config) -> Self {
        Self {
            source,
            default_url: Arc::from(config.source.default_url.as_str()),
            dashboard: Arc::new(config.dashboard.clone()),
            config: Arc::new(config.api.clone()),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// The feed URL for a request, falling back to the default
    ///
    /// An explicitly empty URL is rejected.
    pub fn feed_url(&self, requested: Option<&str>) -> ApiResult<String> {
        match requested.map(str::trim) {
            None => Ok(self.default_url.to_string()),
            Some("") => Err(ApiError::Validation("url must not be empty".to_string())),
            Some(url) => Ok(url.to_string()),
        }
    }
}
