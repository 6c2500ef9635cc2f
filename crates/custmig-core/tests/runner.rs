use std::fs;
use std::path::{Path, PathBuf};

use custmig_core::{MigrationRunner, RunError, RunOutcome, collect_candidates};
use custmig_countries::{CountryTable, StaticCountrySource};
use custmig_ingest::IngestError;
use custmig_model::{MigrationSummary, PersistedCustomer, ValidCustomer};
use calamine::{Reader, Xlsx, open_workbook};
use custmig_report::{CsvReportWriter, MAX_CELL_CHARS, XlsxReportWriter};
use custmig_store::{CustomerStore, MemoryCustomerStore, StoreError};
use custmig_validate::CustomerValidator;
use tempfile::TempDir;

const SOURCE: &str = "\
id,name,age,location,email
1,\"John Smith\",25,France,john@example.com
2,\"Jane X\",150,Nowhereland,jane@example.com
3,No Mail,30,France,
4,Anna Bell,'40',  atlantis ,anna@example.com
5,John Again,33,France,john@example.com
";

fn countries() -> CountryTable {
    CountryTable::build(&StaticCountrySource::from_entries([
        ("FR", "FRA", "France"),
        ("DE", "DEU", "Germany"),
    ]))
    .expect("static countries")
}

fn runner() -> MigrationRunner<MemoryCustomerStore> {
    MigrationRunner::new(MemoryCustomerStore::new(), CustomerValidator::syntax_only())
}

fn write_source(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("customers.csv");
    fs::write(&path, contents).expect("write source");
    path
}

fn completed(outcome: RunOutcome) -> MigrationSummary {
    match outcome {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::NoCustomers => panic!("expected a completed run"),
    }
}

fn run<S: CustomerStore>(
    runner: &mut MigrationRunner<S>,
    source: &Path,
    report: &Path,
) -> Result<RunOutcome, RunError> {
    runner.run(source, report, &countries(), &CsvReportWriter)
}

#[test]
fn example_rows_reach_their_outcomes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(&dir, SOURCE);
    let report = dir.path().join("errors.csv");
    let mut runner = runner();

    let summary = completed(run(&mut runner, &source, &report).expect("run"));
    assert_eq!(summary.candidates, 5);
    assert_eq!(summary.stored, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed(), 2);
    assert_eq!(summary.report_path.as_deref(), Some(report.as_path()));

    let stored = runner.store().customers();
    assert_eq!(
        stored[0],
        PersistedCustomer {
            id: 1,
            name: "John".to_string(),
            surname: "Smith".to_string(),
            email: "john@example.com".to_string(),
            age: 25,
            location: "France".to_string(),
            country_code: "FRA".to_string(),
        }
    );
    assert_eq!(stored[1].name, "Anna");
    assert_eq!(stored[1].age, 40);
    assert_eq!(stored[1].location, "Unknown");
    assert_eq!(stored[1].country_code, "");

    let contents = fs::read_to_string(&report).expect("read report");
    insta::assert_snapshot!(contents.trim_end(), @r"
    id,name,age,location,email,error
    2,Jane X,150,Nowhereland,jane@example.com,age
    3,No Mail,30,France,,email
    ");
}

#[test]
fn second_run_stores_nothing_new() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(&dir, SOURCE);
    let report = dir.path().join("errors.csv");
    let mut runner = runner();

    completed(run(&mut runner, &source, &report).expect("first run"));
    let before = runner.store().customers().to_vec();

    let summary = completed(run(&mut runner, &source, &report).expect("second run"));
    assert_eq!(summary.stored, 0);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.failed(), 2);
    assert_eq!(runner.store().customers(), before.as_slice());
}

#[test]
fn duplicate_email_skips_even_with_bad_age() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(
        &dir,
        "name,age,email\nJohn Smith,25,john@example.com\nJohn Smith,7,john@example.com\n",
    );
    let report = dir.path().join("errors.csv");
    let mut runner = runner();

    let summary = completed(run(&mut runner, &source, &report).expect("run"));
    assert_eq!(summary.stored, 1);
    assert_eq!(summary.skipped, 1);
    assert!(summary.failures.is_empty());
}

#[test]
fn zero_failures_still_write_the_report_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(&dir, "id,name,age,email\n1,John Smith,25,john@example.com\n");
    let report = dir.path().join("errors.csv");

    let summary = completed(run(&mut runner(), &source, &report).expect("run"));
    assert!(summary.failures.is_empty());
    let contents = fs::read_to_string(&report).expect("read report");
    assert_eq!(contents.trim_end(), "id,name,age,email,error");
}

#[test]
fn header_only_source_has_no_customers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let report = dir.path().join("errors.csv");
    for contents in ["id,name,age,location,email\n", "", "id,name\n,\n  , \n"] {
        let source = write_source(&dir, contents);
        let outcome = run(&mut runner(), &source, &report).expect("run");
        assert!(matches!(outcome, RunOutcome::NoCustomers), "{contents:?}");
        assert!(!report.exists());
    }
}

#[test]
fn missing_source_aborts_the_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = dir.path().join("absent.csv");
    let report = dir.path().join("errors.csv");

    let error = run(&mut runner(), &source, &report).expect_err("missing file");
    assert!(matches!(
        error,
        RunError::Source(IngestError::FileNotFound { .. })
    ));
    assert!(!report.exists());
}

#[test]
fn short_and_long_rows_keep_their_cells() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(
        &dir,
        "name,age,email\nShort Row,20\nLong Row,101,long@example.com,extra\n",
    );
    let report = dir.path().join("errors.csv");

    let summary = completed(run(&mut runner(), &source, &report).expect("run"));
    assert_eq!(summary.stored, 0);
    let rows = summary.error_report_rows();
    assert_eq!(rows[1], vec!["Short Row", "20", "email"]);
    assert_eq!(
        rows[2],
        vec!["Long Row", "101", "long@example.com", "extra", "age"]
    );
}

#[test]
fn oversized_cell_still_reaches_the_xlsx_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let huge = "x".repeat(40_000);
    let source = write_source(
        &dir,
        &format!("name,age,email\nGood One,30,good@example.com\nBad Row,30,{huge}\n"),
    );
    let report = dir.path().join("errors.xlsx");
    let mut runner = runner();

    let outcome = runner.run(&source, &report, &countries(), &XlsxReportWriter);
    let summary = completed(outcome.expect("run"));
    assert_eq!(summary.stored, 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(runner.store().count().expect("count"), 1);

    let mut workbook: Xlsx<_> = open_workbook(&report).expect("open report");
    let range = workbook
        .worksheet_range_at(0)
        .expect("first worksheet")
        .expect("read worksheet");
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "Bad Row");
    assert_eq!(rows[1][2].chars().count(), MAX_CELL_CHARS);
    assert_eq!(rows[1][3], "email");
}

/// Store whose writes fail for one address, as a concurrent writer would cause.
#[derive(Default)]
struct RacingStore {
    inner: MemoryCustomerStore,
}

impl CustomerStore for RacingStore {
    fn exists(&self, email: &str) -> custmig_store::Result<bool> {
        self.inner.exists(email)
    }

    fn create(&mut self, customer: &ValidCustomer) -> custmig_store::Result<PersistedCustomer> {
        if customer.email == "raced@example.com" {
            return Err(StoreError::UniqueViolation {
                email: customer.email.clone(),
            });
        }
        self.inner.create(customer)
    }

    fn count(&self) -> custmig_store::Result<usize> {
        self.inner.count()
    }
}

#[test]
fn store_fault_fails_the_row_and_continues() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(
        &dir,
        "name,age,email\nRace Condition,30,raced@example.com\nAfter Race,31,after@example.com\n",
    );
    let report = dir.path().join("errors.csv");
    let mut runner = MigrationRunner::new(RacingStore::default(), CustomerValidator::syntax_only());

    let summary = completed(run(&mut runner, &source, &report).expect("run"));
    assert_eq!(summary.stored, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(
        summary.failures[0].message,
        "customer with email raced@example.com already exists"
    );
    assert_eq!(runner.store().count().expect("count"), 1);
}

#[test]
fn collect_candidates_skips_blank_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = write_source(&dir, "name,email\nJohn Smith,john@example.com\n ,\nSolo,\n");

    let candidates = collect_candidates(&source, &countries()).expect("collect");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates.header.raw(), ["name", "email"]);
    assert_eq!(candidates.rows[1].name, "Solo");
    assert_eq!(candidates.rows[1].surname, "");
}
