//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::charts::{CategoryShare, HistogramBin, ViewBar};
use crate::dashboard::{Dashboard, DashboardStatus};
use crate::inscription::Inscription;

/// Query string shared by every feed-backed endpoint
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    /// Feed URL; the configured default when absent
    pub url: Option<String>,
}

/// Recent inscriptions response
#[derive(Debug, Serialize)]
pub struct InscriptionsResponse {
    pub source_url: String,
    pub status: DashboardStatus,
    pub message: String,
    pub window_hours: i64,
    /// Records decoded from the feed
    pub fetched: usize,
    /// Feed elements that could not be decoded
    pub rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Recent inscriptions, most viewed first
    pub inscriptions: Vec<Inscription>,
}

impl From<Dashboard> for InscriptionsResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            status: dashboard.status(),
            message: dashboard.status_message(),
            source_url: dashboard.source_url,
            window_hours: dashboard.window_hours,
            fetched: dashboard.fetched,
            rejected: dashboard.rejected,
            notice: dashboard.notice,
            inscriptions: dashboard.recent,
        }
    }
}

/// Chart data response
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub source_url: String,
    pub status: DashboardStatus,
    pub histogram: Vec<HistogramBin>,
    pub top: Vec<ViewBar>,
    /// Absent when no inscription carries a category
    pub categories: Option<Vec<CategoryShare>>,
}

impl From<Dashboard> for ChartsResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            status: dashboard.status(),
            source_url: dashboard.source_url,
            histogram: dashboard.charts.histogram,
            top: dashboard.charts.top,
            categories: dashboard.charts.categories,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub default_source: String,
    pub uptime_seconds: u64,
    pub version: String,
}
