//! Export error types

use thiserror::Error;

/// Errors that can occur while producing export files
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer output was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;
