use std::path::PathBuf;
use thiserror::Error;

/// Persistence failures.
///
/// During a run these are recorded against the row being written; only
/// [`StoreError::Open`] stops the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open customer database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("customer with email {email} already exists")]
    UniqueViolation { email: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
