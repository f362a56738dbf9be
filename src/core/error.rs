//! Error Types
//!
//! Batch-level failures only. Row-level problems never surface as `Err`:
//! a rejected row becomes a record with `RecordStatus::Error` and a
//! human-readable message, and processing continues.

use thiserror::Error;

/// Fatal errors that abort a whole batch before or during setup.
#[derive(Error, Debug)]
pub enum AdresnikError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Input table is empty")]
    EmptyTable,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for batch-level operations
pub type Result<T> = std::result::Result<T, AdresnikError>;
