//! Wiring of the production collaborators from [`MigrationOptions`].

use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use custmig_countries::{CountryTable, source_for};
use custmig_model::MigrationOptions;
use custmig_report::writer_for;
use custmig_store::SqliteCustomerStore;
use custmig_validate::CustomerValidator;

use crate::error::Result;
use crate::runner::{MigrationRunner, RunOutcome};

/// Builds the country table from the configured reference data.
pub fn load_countries(options: &MigrationOptions) -> Result<CountryTable> {
    let span = info_span!("countries");
    let _guard = span.enter();
    let start = Instant::now();
    let source = source_for(&options.countries, options.http_timeout)?;
    let table = CountryTable::build(source.as_ref())?;
    info!(
        countries = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "countries complete"
    );
    Ok(table)
}

/// Migrates `source` into the configured SQLite database and writes the
/// error report to `report`.
///
/// The country table is loaded before the source is opened; if it is
/// unavailable nothing else happens.
pub fn run_with_options(
    source: &Path,
    report: &Path,
    options: &MigrationOptions,
) -> Result<RunOutcome> {
    let countries = load_countries(options)?;
    let validator = CustomerValidator::for_mode(options.domain_check)?;
    let store = SqliteCustomerStore::open(&options.database_path)?;
    let writer = writer_for(report);
    let mut runner = MigrationRunner::new(store, validator);
    runner.run(source, report, &countries, writer.as_ref())
}
