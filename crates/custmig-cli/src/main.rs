//! Customer migration CLI.

use clap::Parser;

use custmig_cli::cli::{Cli, Command};
use custmig_cli::commands::{run_countries, run_migrate};
use custmig_cli::logging::{LogConfig, init_logging};
use custmig_cli::summary::{FINISHED_MESSAGE, NO_CUSTOMERS_MESSAGE, print_summary};
use custmig_core::RunOutcome;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = LogConfig::from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Migrate(args) => match run_migrate(&args) {
            Ok(RunOutcome::NoCustomers) => {
                println!("{NO_CUSTOMERS_MESSAGE}");
                0
            }
            Ok(RunOutcome::Completed(summary)) => {
                println!("{FINISHED_MESSAGE}");
                print_summary(&summary);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Countries(args) => match run_countries(&args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
