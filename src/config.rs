//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::charts::{DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_N};
use crate::pipeline::RecentWindow;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inscription feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Feed URL used when the user does not supply one
    #[serde(default = "default_source_url")]
    pub default_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_source_url() -> String {
    "https://ordinals.com/api/inscriptions".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ordinals-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            default_url: default_source_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Dashboard presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Only inscriptions newer than this many hours are shown
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,

    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Bars in the most viewed chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Fetch images and embed the ZIP link in the rendered page
    #[serde(default = "default_embed_archive")]
    pub embed_archive: bool,
}

fn default_window_hours() -> u32 {
    24
}

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_embed_archive() -> bool {
    true
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            histogram_bins: default_histogram_bins(),
            top_n: default_top_n(),
            embed_archive: default_embed_archive(),
        }
    }
}

impl DashboardConfig {
    /// The recency window described by this config
    pub fn window(&self) -> RecentWindow {
        RecentWindow::hours(self.window_hours)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Serve the file export endpoints
    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_enable_export() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            enable_export: default_enable_export(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ordinals-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/ordinals-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Explicit path if given, otherwise the default search
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(url) = var("ORDINALS_SOURCE_URL") {
            self.source.default_url = url;
        }
        if let Some(secs) = var("ORDINALS_REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.source.request_timeout_secs = secs;
        }

        // Dashboard overrides
        if let Some(hours) = var("ORDINALS_WINDOW_HOURS").and_then(|s| s.parse().ok()) {
            self.dashboard.window_hours = hours;
        }

        // API overrides
        if let Some(host) = var("ORDINALS_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("ORDINALS_API_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = port;
        }

        // Logging overrides
        if let Some(level) = var("ORDINALS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ORDINALS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Ordinals Dashboard Configuration
#
# Environment variables override these settings:
# - ORDINALS_SOURCE_URL
# - ORDINALS_REQUEST_TIMEOUT_SECS
# - ORDINALS_WINDOW_HOURS
# - ORDINALS_API_HOST
# - ORDINALS_API_PORT
# - ORDINALS_LOG_LEVEL
# - ORDINALS_LOG_FORMAT

[source]
# Feed used when no URL is given
default_url = "https://ordinals.com/api/inscriptions"

# Timeout for feed and image requests (seconds)
request_timeout_secs = 30

[dashboard]
# Show inscriptions created within this many hours
window_hours = 24

# Bins in the views histogram
histogram_bins = 20

# Bars in the most viewed chart
top_n = 10

# Fetch images and embed a ZIP download in the page
embed_archive = true

[api]
# Server host
host = "0.0.0.0"

# Server port
port = 8501

# Allowed CORS origins (empty = any)
cors_origins = []

# Serve /api/v1/export/* endpoints
enable_export = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
