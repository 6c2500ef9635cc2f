//! Integration tests for argument handling, commands and summary output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use custmig_cli::cli::{Cli, Command, MigrateArgs};
use custmig_cli::commands::{migration_options, run_migrate};
use custmig_cli::logging::{LogConfig, LogFormat};
use custmig_cli::summary::{reason_table, summary_table};
use custmig_core::RunOutcome;
use custmig_model::options::{DEFAULT_ISO3_URL, DEFAULT_NAMES_URL};
use custmig_model::{
    CountryDataSource, DomainCheckMode, FailedRow, MigrationSummary, RowOutcome, SourceHeader,
    SourceRow,
};

fn migrate_args(args: &[&str]) -> MigrateArgs {
    let argv = ["custmig", "migrate"].iter().chain(args.iter());
    match Cli::try_parse_from(argv).expect("valid arguments").command {
        Command::Migrate(args) => args,
        Command::Countries(_) => panic!("expected migrate"),
    }
}

#[test]
fn migrate_defaults() {
    let args = migrate_args(&["customers.csv", "errors.xlsx"]);
    assert_eq!(args.csv_file_path, PathBuf::from("customers.csv"));
    assert_eq!(args.excel_log_file_path, PathBuf::from("errors.xlsx"));

    let options = migration_options(&args);
    assert_eq!(options.database_path, PathBuf::from("customers.sqlite3"));
    assert_eq!(options.domain_check, DomainCheckMode::Dns);
    assert_eq!(options.http_timeout, Duration::from_secs(30));
    assert_eq!(
        options.countries,
        CountryDataSource::Http {
            iso3_url: DEFAULT_ISO3_URL.to_string(),
            names_url: DEFAULT_NAMES_URL.to_string(),
        }
    );
}

#[test]
fn migrate_flags_map_to_options() {
    let args = migrate_args(&[
        "customers.csv",
        "errors.csv",
        "--database",
        "/tmp/shop.db",
        "--countries-dir",
        "/srv/countries",
        "--skip-dns-check",
        "--http-timeout",
        "5",
    ]);
    let options = migration_options(&args);
    assert_eq!(options.database_path, PathBuf::from("/tmp/shop.db"));
    assert_eq!(options.domain_check, DomainCheckMode::Skip);
    assert_eq!(options.http_timeout, Duration::from_secs(5));
    assert_eq!(
        options.countries,
        CountryDataSource::Directory(PathBuf::from("/srv/countries"))
    );
}

#[test]
fn migrate_requires_both_paths() {
    assert!(Cli::try_parse_from(["custmig", "migrate", "customers.csv"]).is_err());
    assert!(Cli::try_parse_from(["custmig", "migrate"]).is_err());
}

#[test]
fn skip_dns_check_help_mentions_null_mx() {
    let error = match Cli::try_parse_from(["custmig", "migrate", "--help"]) {
        Ok(_) => panic!("--help should stop parsing"),
        Err(error) => error,
    };
    let help = error.to_string();
    assert!(help.contains("--skip-dns-check"), "{help}");
    assert!(help.contains("null MX record"), "{help}");
    assert!(help.contains("example.com"), "{help}");
}

#[test]
fn global_log_flags_follow_the_subcommand() {
    let cli = Cli::try_parse_from([
        "custmig",
        "countries",
        "--countries-dir",
        "data",
        "--log-data",
        "--log-format",
        "json",
    ])
    .expect("valid arguments");
    assert!(cli.log_data);
    assert!(matches!(cli.command, Command::Countries(_)));
}

#[test]
fn log_flags_map_to_log_config() {
    let cli = Cli::try_parse_from([
        "custmig",
        "countries",
        "--log-level",
        "debug",
        "--log-file",
        "custmig.log",
        "--log-format",
        "compact",
    ])
    .expect("valid arguments");
    let config = LogConfig::from_cli(&cli);
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert!(!config.use_env_filter);
    assert!(config.with_timestamps);
    assert!(config.with_target);
    assert!(config.with_spans);
    assert!(!config.with_ansi);
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.log_file, Some(PathBuf::from("custmig.log")));

    let quiet = LogConfig::from_cli(&Cli::try_parse_from(["custmig", "countries"]).expect("valid"));
    assert_eq!(quiet.level_filter, LevelFilter::WARN);
    assert!(quiet.use_env_filter);
    assert!(!quiet.with_timestamps);
    assert!(!quiet.with_target);
    assert!(!quiet.with_spans);
}

fn summary() -> MigrationSummary {
    let mut summary = MigrationSummary::new(SourceHeader::new(vec![
        "name".to_string(),
        "age".to_string(),
        "email".to_string(),
    ]));
    summary.record(RowOutcome::Skipped);
    for (record, reason) in [(2, "age"), (3, "email"), (4, "age")] {
        summary.record(RowOutcome::Failed(FailedRow::new(
            SourceRow::new(record, vec!["x".to_string()]),
            reason,
        )));
    }
    summary
}

#[test]
fn summary_table_lists_outcomes() {
    let rendered = summary_table(&summary()).to_string();
    for label in ["Outcome", "Stored", "Skipped (duplicate email)", "Failed", "TOTAL"] {
        assert!(rendered.contains(label), "missing {label}:\n{rendered}");
    }
}

#[test]
fn reasons_are_grouped() {
    let table = reason_table(&summary()).expect("failures present");
    let rendered = table.to_string();
    assert_eq!(table.row_iter().count(), 2);
    assert!(rendered.contains("age"));
    assert!(rendered.contains("email"));

    let clean = MigrationSummary::new(SourceHeader::default());
    assert!(reason_table(&clean).is_none());
}

fn write_country_dir(dir: &Path) -> PathBuf {
    let countries = dir.join("countries");
    fs::create_dir_all(&countries).expect("create dir");
    fs::write(countries.join("iso3.json"), r#"{"FR": "FRA", "DE": "DEU"}"#).expect("iso3");
    fs::write(
        countries.join("names.json"),
        r#"{"FR": "France", "DE": "Germany"}"#,
    )
    .expect("names");
    countries
}

#[test]
fn run_migrate_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let countries = write_country_dir(dir.path());
    let source = dir.path().join("customers.csv");
    fs::write(
        &source,
        "id,name,age,location,email\n1,\"John Smith\",25,France,john@example.com\n",
    )
    .expect("write source");
    let report = dir.path().join("errors.csv");
    let database = dir.path().join("customers.sqlite3");

    let args = migrate_args(&[
        source.to_str().expect("utf-8 path"),
        report.to_str().expect("utf-8 path"),
        "--database",
        database.to_str().expect("utf-8 path"),
        "--countries-dir",
        countries.to_str().expect("utf-8 path"),
        "--skip-dns-check",
    ]);
    let RunOutcome::Completed(summary) = run_migrate(&args).expect("run") else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.stored, 1);
    assert_eq!(
        fs::read_to_string(&report).expect("report").trim_end(),
        "id,name,age,location,email,error"
    );
}

#[test]
fn run_migrate_reports_missing_source() {
    let dir = tempfile::tempdir().expect("temp dir");
    let countries = write_country_dir(dir.path());
    let missing = dir.path().join("absent.csv");
    let args = migrate_args(&[
        missing.to_str().expect("utf-8 path"),
        "errors.xlsx",
        "--database",
        dir.path().join("db.sqlite3").to_str().expect("utf-8 path"),
        "--countries-dir",
        countries.to_str().expect("utf-8 path"),
        "--skip-dns-check",
    ]);
    let error = run_migrate(&args).expect_err("missing source");
    let message = format!("{error:#}");
    assert!(message.starts_with("migrate "), "{message}");
    assert!(message.contains("CSV file not found"), "{message}");
}
