//! HTTP Inscription Source
//!
//! Fetches feed payloads and images over HTTP with reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{InscriptionSource, SourceError};
use crate::config::SourceConfig;

/// reqwest-backed inscription source
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Create a source with the configured timeout and user agent
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` and return the body of a successful response
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| classify(e, url))?;
        Ok(body.to_vec())
    }
}

fn classify(error: reqwest::Error, url: &str) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout
    } else if error.is_builder() {
        SourceError::InvalidUrl(url.to_string())
    } else if error.is_connect() {
        SourceError::Unavailable(url.to_string())
    } else {
        SourceError::Request(error)
    }
}

#[async_trait]
impl InscriptionSource for HttpSource {
    async fn fetch_payload(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        tracing::debug!(url = %url, "Fetching inscription feed");
        self.get_bytes(url).await
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        tracing::debug!(url = %url, "Fetching inscription image");
        self.get_bytes(url).await
    }
}
