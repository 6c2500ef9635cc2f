//! Errors that abort a migration run.

use thiserror::Error;

use custmig_countries::CountryError;
use custmig_ingest::IngestError;
use custmig_report::ReportError;
use custmig_store::StoreError;
use custmig_validate::DomainCheckError;

/// Run-level failures. Row-level problems never surface here; they end up
/// in the error report instead.
#[derive(Debug, Error)]
pub enum RunError {
    /// Country reference data could not be fetched or parsed.
    #[error("country lookup unavailable: {0}")]
    LookupUnavailable(#[from] CountryError),

    /// The source file could not be opened or read.
    #[error(transparent)]
    Source(#[from] IngestError),

    /// The customer store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The error report could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The email domain checker could not be set up.
    #[error(transparent)]
    DomainCheck(#[from] DomainCheckError),
}

pub type Result<T> = std::result::Result<T, RunError>;
