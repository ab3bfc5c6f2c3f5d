//! Inscription Sources
//!
//! Where inscription data and images come from.
//!
//! - [`InscriptionSource`]: async trait for fetching feed payloads and images
//! - [`HttpSource`]: reqwest-backed implementation
//! - [`fetch_inscriptions`]: one fetch-and-decode pass that never fails
//!
//! A failed fetch is not an error for the caller: it yields an empty
//! [`FetchOutcome`] carrying a user-facing notice.

mod error;
mod http;

pub use error::SourceError;
pub use http::HttpSource;

use async_trait::async_trait;

use crate::inscription::{decode_records, DecodedBatch, Inscription};

/// Common trait for anything that can serve inscription data
#[async_trait]
pub trait InscriptionSource: Send + Sync {
    /// Fetch the raw feed body at `url`
    async fn fetch_payload(&self, url: &str) -> Result<Vec<u8>, SourceError>;

    /// Fetch the image bytes at `url`
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Result of one fetch-and-decode pass
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Decoded records in feed order
    pub records: Vec<Inscription>,
    /// Number of feed elements that could not be decoded
    pub rejected: usize,
    /// Error message for the user, set when the fetch failed
    pub notice: Option<String>,
}

impl FetchOutcome {
    /// An empty outcome carrying an error notice
    pub fn failed(notice: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            rejected: 0,
            notice: Some(notice.into()),
        }
    }

    /// Whether the fetch produced no usable records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<DecodedBatch> for FetchOutcome {
    fn from(batch: DecodedBatch) -> Self {
        Self {
            records: batch.records,
            rejected: batch.rejected.len(),
            notice: None,
        }
    }
}

/// Fetch and decode the feed at `url`
///
/// Network failures, non-success statuses and malformed bodies all turn
/// into an empty outcome with a notice.
pub async fn fetch_inscriptions(source: &dyn InscriptionSource, url: &str) -> FetchOutcome {
    match try_fetch(source, url).await {
        Ok(batch) => {
            tracing::info!(
                url = %url,
                records = batch.records.len(),
                rejected = batch.rejected.len(),
                "Fetched inscriptions"
            );
            batch.into()
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to fetch inscriptions");
            FetchOutcome::failed(e.notice())
        }
    }
}

async fn try_fetch(source: &dyn InscriptionSource, url: &str) -> Result<DecodedBatch, SourceError> {
    let payload = source.fetch_payload(url).await?;
    Ok(decode_records(&payload)?)
}


#[cfg(test)]
mod tests {
    use super::testing::StaticSource;
    use super::*;
    use chrono::Utc;

    const FEED: &str = "https://feed.test/inscriptions";

    #[tokio::test]
    async fn test_fetch_decodes_records() {
        let records = vec![
            Inscription::new("a", 3, Utc::now(), "https://img/a"),
            Inscription::new("b", 9, Utc::now(), "https://img/b").category("art"),
        ];
        let source = StaticSource::new().with_feed(FEED, &records);

        let outcome = fetch_inscriptions(&source, FEED).await;

        assert!(outcome.notice.is_none());
        assert_eq!(outcome.rejected, 0);
        assert_eq!(outcome.records, records);
    }

    #[tokio::test]
    async fn test_non_success_status_is_empty() {
        let source = StaticSource::new().with_status(FEED, 500);

        let outcome = fetch_inscriptions(&source, FEED).await;

        assert!(outcome.is_empty());
        assert_eq!(
            outcome.notice.as_deref(),
            Some("Failed to retrieve data. Status code: 500")
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_empty() {
        let source = StaticSource::new().with_body(FEED, "{\"oops\": true}");

        let outcome = fetch_inscriptions(&source, FEED).await;

        assert!(outcome.is_empty());
        let notice = outcome.notice.unwrap();
        assert!(notice.starts_with("Failed to retrieve data: Malformed payload"));
    }

    #[tokio::test]
    async fn test_rejected_elements_are_counted() {
        let body = r#"[
            {"title": "ok", "views": 1, "created_at": "2024-05-01T00:00:00Z", "image_url": "u"},
            {"title": "broken"}
        ]"#;
        let source = StaticSource::new().with_body(FEED, body);

        let outcome = fetch_inscriptions(&source, FEED).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.rejected, 1);
        assert!(outcome.notice.is_none());
    }
}
