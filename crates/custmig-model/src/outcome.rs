//! Per-row outcomes and the summary of one migration run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::customer::PersistedCustomer;
use crate::source::{SourceHeader, SourceRow};

/// One entry of the error report: the original cells plus a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRow {
    pub row: SourceRow,
    pub message: String,
}

impl FailedRow {
    pub fn new(row: SourceRow, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }

    /// Report row: original cell values followed by the message.
    pub fn report_row(&self) -> Vec<String> {
        let mut cells = self.row.cells.clone();
        cells.push(self.message.clone());
        cells
    }
}

/// Terminal state of one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Written to the store.
    Stored(PersistedCustomer),
    /// A customer with the same email already exists. Not an error.
    Skipped,
    /// Rejected by validation or the store.
    Failed(FailedRow),
}

impl RowOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stored(_) => "stored",
            Self::Skipped => "skipped",
            Self::Failed(_) => "failed",
        }
    }
}

/// Accumulated result of processing every candidate of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub header: SourceHeader,
    pub candidates: usize,
    pub stored: usize,
    pub skipped: usize,
    /// Failures in encounter order.
    pub failures: Vec<FailedRow>,
    /// Where the error report was written, if it was.
    pub report_path: Option<PathBuf>,
}

impl MigrationSummary {
    pub fn new(header: SourceHeader) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Folds one row outcome into the counters.
    pub fn record(&mut self, outcome: RowOutcome) {
        self.candidates += 1;
        match outcome {
            RowOutcome::Stored(_) => self.stored += 1,
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Rows of the error report: header plus one row per failure.
    pub fn error_report_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.failures.len() + 1);
        rows.push(self.header.report_header());
        rows.extend(self.failures.iter().map(FailedRow::report_row));
        rows
    }
}
