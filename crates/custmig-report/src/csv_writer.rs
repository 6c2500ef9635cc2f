use std::path::Path;

use tracing::info;

use crate::ErrorReportWriter;
use crate::error::{ReportError, Result};

/// Comma-delimited report, one record per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportWriter;

impl ErrorReportWriter for CsvReportWriter {
    fn write(&self, rows: &[Vec<String>], path: &Path) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let to_csv = |source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(to_csv)?;
        for row in rows {
            writer.write_record(row).map_err(to_csv)?;
        }
        writer
            .flush()
            .map_err(|e| to_csv(csv::Error::from(e)))?;
        info!(path = %path.display(), rows = rows.len(), "error report written");
        Ok(())
    }
}
