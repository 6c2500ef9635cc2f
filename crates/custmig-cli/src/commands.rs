use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span};

use custmig_core::{RunOutcome, run_with_options};
use custmig_countries::{CountryTable, source_for, write_directory};
use custmig_model::{CountryDataSource, DomainCheckMode, MigrationOptions};

use crate::cli::{CountriesArgs, CountryArgs, MigrateArgs};
use crate::logging::redact_value;
use crate::summary::apply_table_style;

/// Options for a migration run built from the `migrate` flags.
pub fn migration_options(args: &MigrateArgs) -> MigrationOptions {
    let mut options = MigrationOptions::new()
        .with_database_path(&args.database)
        .with_countries(country_data_source(&args.countries))
        .with_domain_check(if args.skip_dns_check {
            DomainCheckMode::Skip
        } else {
            DomainCheckMode::Dns
        });
    options.http_timeout = Duration::from_secs(args.countries.http_timeout);
    options
}

/// A local directory takes precedence over the URLs.
pub fn country_data_source(args: &CountryArgs) -> CountryDataSource {
    match &args.countries_dir {
        Some(dir) => CountryDataSource::Directory(dir.clone()),
        None => CountryDataSource::Http {
            iso3_url: args.iso3_url.clone(),
            names_url: args.names_url.clone(),
        },
    }
}

pub fn run_migrate(args: &MigrateArgs) -> Result<RunOutcome> {
    let options = migration_options(args);
    info!(
        source = %args.csv_file_path.display(),
        report = %args.excel_log_file_path.display(),
        database = %options.database_path.display(),
        "starting migration"
    );
    let outcome = run_with_options(&args.csv_file_path, &args.excel_log_file_path, &options)
        .with_context(|| format!("migrate {}", args.csv_file_path.display()))?;
    if let RunOutcome::Completed(summary) = &outcome {
        for failure in &summary.failures {
            let cells = failure.row.cells.join(",");
            debug!(
                record = failure.row.record,
                reason = %failure.message,
                row = %redact_value(&cells),
                "row failed"
            );
        }
    }
    Ok(outcome)
}

pub fn run_countries(args: &CountriesArgs) -> Result<()> {
    let span = info_span!("countries");
    let _guard = span.enter();
    let source = source_for(
        &country_data_source(&args.countries),
        Duration::from_secs(args.countries.http_timeout),
    )
    .context("configure country source")?;
    let data = source.fetch().context("load country data")?;
    if let Some(dir) = &args.save_dir {
        write_directory(dir, &data)
            .with_context(|| format!("save country data to {}", dir.display()))?;
        info!(dir = %dir.display(), "country data saved");
    }
    let countries = CountryTable::from_data(&data);
    let mut table = Table::new();
    table.set_header(vec!["Country", "ISO3"]);
    apply_table_style(&mut table);
    for (name, code) in countries.iter() {
        table.add_row(vec![name, code]);
    }
    println!("{table}");
    Ok(())
}
