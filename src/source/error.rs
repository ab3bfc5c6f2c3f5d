//! Source error types

use thiserror::Error;

use crate::inscription::RecordError;

/// Errors that can occur while fetching from the inscription feed
#[derive(Error, Debug)]
pub enum SourceError {
    /// The server answered with a non-success status
    #[error("Status code: {0}")]
    Status(u16),

    #[error("Request timeout")]
    Timeout,

    /// Connection could not be established
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The URL could not be turned into a request
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The body was not a JSON array of inscriptions
    #[error("{0}")]
    Payload(#[from] RecordError),
}

impl SourceError {
    /// Message shown to the user when a fetch fails
    pub fn notice(&self) -> String {
        match self {
            SourceError::Status(code) => {
                format!("Failed to retrieve data. Status code: {}", code)
            }
            other => format!("Failed to retrieve data: {}", other),
        }
    }
}
