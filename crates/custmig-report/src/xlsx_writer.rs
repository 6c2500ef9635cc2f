use std::borrow::Cow;
use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use tracing::{info, warn};

use crate::ErrorReportWriter;
use crate::error::{ReportError, Result};

/// Longest text a worksheet cell can hold, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Single-sheet XLSX workbook with a bold header row.
///
/// Cells longer than [`MAX_CELL_CHARS`] are truncated so that one oversized
/// value cannot keep the other failed rows out of the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReportWriter;

impl ErrorReportWriter for XlsxReportWriter {
    fn write(&self, rows: &[Vec<String>], path: &Path) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let to_xlsx = |source| ReportError::Xlsx {
            path: path.to_path_buf(),
            source,
        };
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();
        for (row_index, row) in rows.iter().enumerate() {
            let row_num = RowNum::try_from(row_index).map_err(|_| ReportError::TooLarge {
                rows: rows.len(),
                columns: row.len(),
            })?;
            for (col_index, value) in row.iter().enumerate() {
                let col_num = ColNum::try_from(col_index).map_err(|_| ReportError::TooLarge {
                    rows: rows.len(),
                    columns: row.len(),
                })?;
                let text = clip_cell(value);
                if let Cow::Owned(_) = text {
                    warn!(
                        row = row_index,
                        column = col_index,
                        chars = value.chars().count(),
                        "cell truncated to worksheet limit"
                    );
                }
                if row_index == 0 {
                    worksheet
                        .write_string_with_format(row_num, col_num, text.as_ref(), &bold)
                        .map_err(to_xlsx)?;
                } else {
                    worksheet
                        .write_string(row_num, col_num, text.as_ref())
                        .map_err(to_xlsx)?;
                }
            }
        }
        workbook.save(path).map_err(to_xlsx)?;
        info!(path = %path.display(), rows = rows.len(), "error report written");
        Ok(())
    }
}

fn clip_cell(value: &str) -> Cow<'_, str> {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => Cow::Owned(value[..end].to_string()),
        None => Cow::Borrowed(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cells_are_borrowed() {
        assert!(matches!(clip_cell("age"), Cow::Borrowed("age")));
        let exact = "x".repeat(MAX_CELL_CHARS);
        assert!(matches!(clip_cell(&exact), Cow::Borrowed(_)));
    }

    #[test]
    fn long_cells_keep_whole_characters() {
        let long = "é".repeat(MAX_CELL_CHARS + 10);
        let clipped = clip_cell(&long);
        assert_eq!(clipped.chars().count(), MAX_CELL_CHARS);
        assert!(clipped.chars().all(|c| c == 'é'));
    }
}
