use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write XLSX report {path}: {source}")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("failed to write CSV report {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("report does not fit in a worksheet: {rows} rows, {columns} columns")]
    TooLarge { rows: usize, columns: usize },
}

pub type Result<T> = std::result::Result<T, ReportError>;
