//! CLI argument definitions for the customer migration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use custmig_model::options::{DEFAULT_DATABASE_PATH, DEFAULT_ISO3_URL, DEFAULT_NAMES_URL};

#[derive(Parser)]
#[command(
    name = "custmig",
    version,
    about = "Migrate customers from a CSV file into the customer database",
    long_about = "Migrate customers from a CSV file into the customer database.\n\n\
                  Rows that fail validation are written to an error report \
                  (XLSX, or CSV when the report path ends in .csv)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include customer values (names, emails, raw rows) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Migrate customers from a CSV file and write the error report.
    Migrate(MigrateArgs),

    /// Print the country name to ISO3 lookup table.
    Countries(CountriesArgs),
}

#[derive(Parser)]
pub struct MigrateArgs {
    /// Source CSV file; the first row holds the field keys.
    #[arg(value_name = "CSV_FILE_PATH")]
    pub csv_file_path: PathBuf,

    /// Destination of the error report.
    #[arg(value_name = "EXCEL_LOG_FILE_PATH")]
    pub excel_log_file_path: PathBuf,

    /// SQLite database holding the customers table.
    #[arg(long = "database", value_name = "PATH", default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    #[command(flatten)]
    pub countries: CountryArgs,

    /// Accept any syntactically valid email without looking up its domain.
    /// Without this flag, domains that publish a null MX record (such as
    /// example.com) or have no mail or address records are rejected.
    #[arg(long = "skip-dns-check")]
    pub skip_dns_check: bool,
}

#[derive(Parser)]
pub struct CountriesArgs {
    #[command(flatten)]
    pub countries: CountryArgs,

    /// Also save the fetched reference documents to this directory.
    ///
    /// The saved directory can be passed to --countries-dir later to run
    /// without network access.
    #[arg(long = "save-dir", value_name = "DIR")]
    pub save_dir: Option<PathBuf>,
}

/// Where the country reference data is read from.
#[derive(Args)]
pub struct CountryArgs {
    /// Read iso3.json and names.json from a local directory instead of HTTP.
    #[arg(long = "countries-dir", value_name = "DIR")]
    pub countries_dir: Option<PathBuf>,

    /// URL of the ISO2 to ISO3 code document.
    #[arg(long = "iso3-url", value_name = "URL", default_value = DEFAULT_ISO3_URL)]
    pub iso3_url: String,

    /// URL of the ISO2 to country name document.
    #[arg(long = "names-url", value_name = "URL", default_value = DEFAULT_NAMES_URL)]
    pub names_url: String,

    /// Timeout for each reference data request.
    #[arg(long = "http-timeout", value_name = "SECS", default_value_t = 30)]
    pub http_timeout: u64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
