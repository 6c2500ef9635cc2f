//! Error types for reading the customer source file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the source file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Source file could not be opened.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream failed mid-file.
    #[error("failed to read record {record} of {path}: {source}")]
    CsvRead {
        path: PathBuf,
        record: u64,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
