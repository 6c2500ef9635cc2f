//! Per-row migration state machine and run orchestration.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use custmig_countries::CountryTable;
use custmig_ingest::SourceReader;
use custmig_model::{
    CandidateCustomer, FailedRow, Field, MigrationSummary, RowOutcome, SourceHeader,
};
use custmig_report::ErrorReportWriter;
use custmig_store::CustomerStore;
use custmig_transform::RowNormalizer;
use custmig_validate::CustomerValidator;

use crate::error::Result;

/// Candidates read from one source file, in source order.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub header: SourceHeader,
    pub rows: Vec<CandidateCustomer>,
}

impl Candidates {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The source produced no candidates; nothing was written.
    NoCustomers,
    /// Every candidate was processed and the error report was written.
    Completed(MigrationSummary),
}

/// Streams `path` through the normalizer, keeping every non-empty candidate.
pub fn collect_candidates(path: &Path, countries: &CountryTable) -> Result<Candidates> {
    let mut reader = SourceReader::open(path)?;
    let header = reader.header().clone();
    let normalizer = RowNormalizer::new(&header, countries);
    let mut rows = Vec::new();
    for row in &mut reader {
        if let Some(candidate) = normalizer.normalize(row?) {
            rows.push(candidate);
        }
    }
    debug!(
        records = reader.records_read(),
        candidates = rows.len(),
        "source read"
    );
    Ok(Candidates { header, rows })
}

/// Applies validation and persistence to candidates one at a time.
pub struct MigrationRunner<S> {
    store: S,
    validator: CustomerValidator,
}

impl<S: CustomerStore> MigrationRunner<S> {
    pub fn new(store: S, validator: CustomerValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decides the outcome of one candidate.
    ///
    /// Email is checked before the duplicate lookup and age after it, so a
    /// row whose email is already stored is skipped even with a bad age.
    /// Store faults are recorded against the row and never propagate.
    pub fn process(&mut self, candidate: CandidateCustomer) -> RowOutcome {
        let validated = self.validator.validate(&candidate);
        if let Err(error) = &validated
            && error.field() == Field::Email
        {
            return RowOutcome::Failed(FailedRow::new(candidate.src_data, error.to_string()));
        }
        match self.store.exists(&candidate.email) {
            Ok(true) => return RowOutcome::Skipped,
            Ok(false) => {}
            Err(error) => {
                warn!(record = candidate.src_data.record, %error, "duplicate check failed");
                return RowOutcome::Failed(FailedRow::new(candidate.src_data, error.to_string()));
            }
        }
        let valid = match validated {
            Ok(valid) => valid,
            Err(error) => {
                return RowOutcome::Failed(FailedRow::new(candidate.src_data, error.to_string()));
            }
        };
        match self.store.create(&valid) {
            Ok(persisted) => RowOutcome::Stored(persisted),
            Err(error) => {
                warn!(record = candidate.src_data.record, %error, "customer write failed");
                RowOutcome::Failed(FailedRow::new(candidate.src_data, error.to_string()))
            }
        }
    }

    /// Processes every candidate in order and accumulates the outcomes.
    pub fn migrate(&mut self, candidates: Candidates) -> MigrationSummary {
        let mut summary = MigrationSummary::new(candidates.header);
        for candidate in candidates.rows {
            let record = candidate.src_data.record;
            let outcome = self.process(candidate);
            debug!(record, outcome = outcome.label(), "row processed");
            summary.record(outcome);
        }
        summary
    }

    /// Runs the whole pipeline for one source file.
    ///
    /// No report is written when the source yields no candidates. Otherwise
    /// the report always gets at least its header row.
    pub fn run(
        &mut self,
        source: &Path,
        report: &Path,
        countries: &CountryTable,
        writer: &dyn ErrorReportWriter,
    ) -> Result<RunOutcome> {
        let span = info_span!("migration", source = %source.display());
        let _guard = span.enter();

        let ingest_start = Instant::now();
        let candidates = info_span!("ingest").in_scope(|| collect_candidates(source, countries))?;
        info!(
            candidates = candidates.len(),
            duration_ms = ingest_start.elapsed().as_millis(),
            "ingest complete"
        );
        if candidates.is_empty() {
            info!("no customers found");
            return Ok(RunOutcome::NoCustomers);
        }

        let persist_start = Instant::now();
        let mut summary = info_span!("persist").in_scope(|| self.migrate(candidates));
        info!(
            stored = summary.stored,
            skipped = summary.skipped,
            failed = summary.failed(),
            duration_ms = persist_start.elapsed().as_millis(),
            "persist complete"
        );

        let report_start = Instant::now();
        let rows = summary.error_report_rows();
        info_span!("report", path = %report.display()).in_scope(|| writer.write(&rows, report))?;
        info!(
            rows = rows.len(),
            duration_ms = report_start.elapsed().as_millis(),
            "report complete"
        );
        summary.report_path = Some(report.to_path_buf());
        Ok(RunOutcome::Completed(summary))
    }
}
