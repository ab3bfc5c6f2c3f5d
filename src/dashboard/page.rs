//! Page assembly
//!
//! Runs the fetch, filter and export steps for one page render.

use chrono::{DateTime, Utc};

use super::Dashboard;
use crate::config::DashboardConfig;
use crate::export::{build_image_archive, encode_csv, DownloadLink, ExportResult, ImageArchive};
use crate::source::{fetch_inscriptions, InscriptionSource};

/// Everything needed to render the dashboard page
#[derive(Debug, Clone)]
pub struct Page {
    /// Value shown in the URL field
    pub form_url: String,
    /// Recency window the page describes
    pub window_hours: i64,
    /// `None` when no URL was submitted
    pub dashboard: Option<Dashboard>,
    pub csv_link: Option<DownloadLink>,
    pub archive: Option<ImageArchive>,
}

impl Page {
    /// A page showing only the URL form
    pub fn form_only(form_url: impl Into<String>, config: &DashboardConfig) -> Self {
        Self {
            form_url: form_url.into(),
            window_hours: config.window().len_hours(),
            dashboard: None,
            csv_link: None,
            archive: None,
        }
    }

    /// Fetch `url` and assemble the page
    ///
    /// An empty URL yields the form only. Downloads are attached only when
    /// there is at least one recent inscription.
    pub async fn load(
        source: &dyn InscriptionSource,
        url: &str,
        config: &DashboardConfig,
        now: DateTime<Utc>,
    ) -> ExportResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(Self::form_only("", config));
        }

        let outcome = fetch_inscriptions(source, url).await;
        let dashboard = Dashboard::build(url, &outcome, config, now);

        let (csv_link, archive) = if dashboard.recent.is_empty() {
            (None, None)
        } else {
            let csv_link = DownloadLink::csv(&encode_csv(&dashboard.recent)?);
            let archive = if config.embed_archive {
                Some(build_image_archive(source, &dashboard.recent).await?)
            } else {
                None
            };
            (Some(csv_link), archive)
        };

        Ok(Self {
            form_url: url.to_string(),
            window_hours: dashboard.window_hours,
            dashboard: Some(dashboard),
            csv_link,
            archive,
        })
    }

    /// Link for the embedded archive, if one was built
    pub fn archive_link(&self) -> Option<DownloadLink> {
        self.archive
            .as_ref()
            .map(|archive| DownloadLink::archive(&archive.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardStatus;
    use crate::inscription::Inscription;
    use crate::source::testing::StaticSource;
    use chrono::Duration;

    const FEED: &str = "https://feed.test/api/inscriptions";

    fn fixture(now: DateTime<Utc>) -> StaticSource {
        let records = vec![
            Inscription::new("one", 5, now - Duration::hours(1), "https://img/1"),
            Inscription::new("two", 9, now - Duration::hours(2), "https://img/2"),
            Inscription::new("stale", 50, now - Duration::hours(40), "https://img/3"),
        ];
        StaticSource::new()
            .with_feed(FEED, &records)
            .with_body("https://img/1", "one")
            .with_body("https://img/2", "two")
    }

    #[tokio::test]
    async fn test_empty_url_is_form_only() {
        let page = Page::load(&StaticSource::new(), "  ", &DashboardConfig::default(), Utc::now())
            .await
            .unwrap();

        assert!(page.dashboard.is_none());
        assert!(page.csv_link.is_none());
    }

    #[tokio::test]
    async fn test_load_attaches_downloads() {
        let now = Utc::now();
        let page = Page::load(&fixture(now), FEED, &DashboardConfig::default(), now)
            .await
            .unwrap();

        let dashboard = page.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.status(), DashboardStatus::Ready);
        assert_eq!(dashboard.recent.len(), 2);
        assert!(page.csv_link.is_some());

        let archive = page.archive.as_ref().unwrap();
        assert_eq!(archive.included, vec!["image_0.png", "image_1.png"]);
        assert!(page.archive_link().is_some());
    }

    #[tokio::test]
    async fn test_archive_can_be_disabled() {
        let now = Utc::now();
        let config = DashboardConfig {
            embed_archive: false,
            ..Default::default()
        };

        let page = Page::load(&fixture(now), FEED, &config, now).await.unwrap();

        assert!(page.csv_link.is_some());
        assert!(page.archive.is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_has_no_downloads() {
        let source = StaticSource::new().with_status(FEED, 502);

        let page = Page::load(&source, FEED, &DashboardConfig::default(), Utc::now())
            .await
            .unwrap();

        let dashboard = page.dashboard.unwrap();
        assert_eq!(dashboard.status(), DashboardStatus::NoData);
        assert_eq!(
            dashboard.notice.as_deref(),
            Some("Failed to retrieve data. Status code: 502")
        );
        assert!(page.csv_link.is_none());
        assert!(page.archive.is_none());
    }
}
