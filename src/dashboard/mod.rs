//! Dashboard
//!
//! Assembles one render cycle of the dashboard:
//!
//! 1. fetch the feed ([`crate::source::fetch_inscriptions`])
//! 2. keep recent inscriptions, most viewed first ([`crate::pipeline`])
//! 3. derive the charts ([`crate::charts`])
//! 4. attach the CSV and image archive downloads ([`crate::export`])
//!
//! The result is rendered either as a self-contained HTML page
//! ([`render_html`]) or as terminal text ([`render_text`]).

mod html;
mod page;
mod text;

pub use html::{html_escape, render_html};
pub use page::Page;
pub use text::{render_charts_text, render_text};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::charts::ChartSet;
use crate::config::DashboardConfig;
use crate::inscription::Inscription;
use crate::pipeline::filter_and_sort;
use crate::source::FetchOutcome;

/// Page heading for a window of `hours`
pub fn dashboard_title(hours: i64) -> String {
    format!("Most Viewed Inscriptions in the Last {} Hours", hours)
}

/// What the dashboard has to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    /// The fetch produced no records
    NoData,
    /// Records were fetched but none are recent
    NoRecent,
    /// At least one recent inscription
    Ready,
}

/// View model for one render cycle
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub source_url: String,
    pub window_hours: i64,
    pub generated_at: DateTime<Utc>,
    /// Records decoded from the feed
    pub fetched: usize,
    /// Feed elements that could not be decoded
    pub rejected: usize,
    /// Fetch error shown to the user
    pub notice: Option<String>,
    /// Recent inscriptions, most viewed first
    pub recent: Vec<Inscription>,
    pub charts: ChartSet,
}

impl Dashboard {
    /// Build the view model from a fetch outcome
    pub fn build(
        source_url: &str,
        outcome: &FetchOutcome,
        config: &DashboardConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let window = config.window();
        let recent = filter_and_sort(&outcome.records, window, now);
        let charts = ChartSet::build(&recent, config.histogram_bins, config.top_n);

        Self {
            source_url: source_url.to_string(),
            window_hours: window.len_hours(),
            generated_at: now,
            fetched: outcome.records.len(),
            rejected: outcome.rejected,
            notice: outcome.notice.clone(),
            recent,
            charts,
        }
    }

    pub fn status(&self) -> DashboardStatus {
        if self.fetched == 0 {
            DashboardStatus::NoData
        } else if self.recent.is_empty() {
            DashboardStatus::NoRecent
        } else {
            DashboardStatus::Ready
        }
    }

    /// One-line summary shown above the table
    pub fn status_message(&self) -> String {
        match self.status() {
            DashboardStatus::NoData => "No data available.".to_string(),
            DashboardStatus::NoRecent => format!(
                "No inscriptions found in the last {} hours.",
                self.window_hours
            ),
            DashboardStatus::Ready => format!(
                "Found {} inscriptions in the last {} hours.",
                self.recent.len(),
                self.window_hours
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
    }

    fn outcome(records: Vec<Inscription>) -> FetchOutcome {
        FetchOutcome {
            records,
            rejected: 0,
            notice: None,
        }
    }

    #[test]
    fn test_no_data() {
        let dashboard = Dashboard::build(
            "u",
            &FetchOutcome::failed("Failed to retrieve data. Status code: 404"),
            &DashboardConfig::default(),
            now(),
        );

        assert_eq!(dashboard.status(), DashboardStatus::NoData);
        assert_eq!(dashboard.status_message(), "No data available.");
        assert!(dashboard.notice.is_some());
    }

    #[test]
    fn test_no_recent() {
        let old = Inscription::new("old", 5, now() - Duration::days(2), "u");
        let dashboard = Dashboard::build("u", &outcome(vec![old]), &DashboardConfig::default(), now());

        assert_eq!(dashboard.status(), DashboardStatus::NoRecent);
        assert_eq!(
            dashboard.status_message(),
            "No inscriptions found in the last 24 hours."
        );
        assert!(dashboard.charts.histogram.is_empty());
    }

    #[test]
    fn test_ready() {
        let records = vec![
            Inscription::new("low", 1, now() - Duration::hours(1), "u"),
            Inscription::new("high", 8, now() - Duration::hours(2), "u").category("art"),
            Inscription::new("old", 99, now() - Duration::hours(30), "u"),
        ];
        let dashboard = Dashboard::build("u", &outcome(records), &DashboardConfig::default(), now());

        assert_eq!(dashboard.status(), DashboardStatus::Ready);
        assert_eq!(dashboard.fetched, 3);
        assert_eq!(dashboard.recent[0].title, "high");
        assert_eq!(
            dashboard.status_message(),
            "Found 2 inscriptions in the last 24 hours."
        );
        assert_eq!(dashboard.charts.top.len(), 2);
    }

    #[test]
    fn test_huge_window_does_not_panic() {
        let records = vec![Inscription::new("ancient", 4, now() - Duration::days(3650), "u")];
        let config = DashboardConfig {
            window_hours: u32::MAX,
            ..Default::default()
        };

        let dashboard = Dashboard::build("u", &outcome(records), &config, now());

        assert_eq!(dashboard.status(), DashboardStatus::Ready);
        assert_eq!(dashboard.recent.len(), 1);
    }

    #[test]
    fn test_all_rejected_is_no_data() {
        let outcome = FetchOutcome {
            records: Vec::new(),
            rejected: 3,
            notice: None,
        };
        let dashboard = Dashboard::build("u", &outcome, &DashboardConfig::default(), now());

        assert_eq!(dashboard.status(), DashboardStatus::NoData);
        assert_eq!(dashboard.rejected, 3);
    }
}
