//! Error types for loading country reference data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching or parsing the country reference documents.
///
/// Any of these means the lookup table is unavailable for the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CountryError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network request failed.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Local reference file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not a JSON object of strings.
    #[error("invalid country data in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for country operations.
pub type Result<T> = std::result::Result<T, CountryError>;
