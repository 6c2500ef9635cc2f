//! Raw source table shapes: the header and one row of cells.

use serde::{Deserialize, Serialize};

use crate::fields::ERROR_COLUMN;

/// Header row of a source file.
///
/// Keeps the raw field names for the error report and a normalized copy
/// (trimmed, lowercase, BOM removed) used to recognize field keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHeader {
    raw: Vec<String>,
    keys: Vec<String>,
}

impl SourceHeader {
    /// Creates a header from the cells of the first source row.
    pub fn new(raw: Vec<String>) -> Self {
        let keys = raw.iter().map(|value| normalize_key(value)).collect();
        Self { raw, keys }
    }

    /// Original field names, as read.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Normalized field keys, positionally aligned with [`Self::raw`].
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Header row of the error report: original field names plus `error`.
    pub fn report_header(&self) -> Vec<String> {
        let mut header = self.raw.clone();
        header.push(ERROR_COLUMN.to_string());
        header
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// One data row of the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    /// 1-based record number in the file (the header is record 1).
    pub record: u64,
    /// Cell values exactly as read.
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(record: u64, cells: Vec<String>) -> Self {
        Self { record, cells }
    }

    /// Cell at `index`, or an empty string when the row is short.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", String::as_str)
    }

    /// True when every cell is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }
}
