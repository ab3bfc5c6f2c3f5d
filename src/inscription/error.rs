//! Inscription decoding errors

use thiserror::Error;

/// Errors raised while decoding inscription data
#[derive(Error, Debug)]
pub enum RecordError {
    /// The payload is not a JSON array
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A `created_at` value is not ISO-8601
    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

/// Result type alias for record decoding
pub type RecordResult<T> = Result<T, RecordError>;
