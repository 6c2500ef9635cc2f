//! Error report generation.
//!
//! The report is a single table: the source header plus `error`, then one
//! row per failed source row. The format follows the destination extension:
//! `.csv` produces CSV, anything else an XLSX workbook.

mod csv_writer;
mod error;
mod xlsx_writer;

use std::path::Path;

pub use crate::csv_writer::CsvReportWriter;
pub use crate::error::{ReportError, Result};
pub use crate::xlsx_writer::{MAX_CELL_CHARS, XlsxReportWriter};

/// Serializes report rows to a file.
pub trait ErrorReportWriter {
    /// Writes `rows` to `path`. Does nothing when `rows` is empty.
    fn write(&self, rows: &[Vec<String>], path: &Path) -> Result<()>;
}

/// Output format of the error report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl ReportFormat {
    /// Chooses the format from the destination extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Writer matching the destination of the report.
pub fn writer_for(path: &Path) -> Box<dyn ErrorReportWriter> {
    match ReportFormat::from_path(path) {
        ReportFormat::Csv => Box::new(CsvReportWriter),
        ReportFormat::Xlsx => Box::new(XlsxReportWriter),
    }
}
