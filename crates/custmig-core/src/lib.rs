//! Customer migration runner.
//!
//! A run loads the country table, streams the source file into candidates,
//! decides one [`RowOutcome`](custmig_model::RowOutcome) per candidate and
//! writes the error report:
//!
//! 1. Invalid or empty email: failed with `email`.
//! 2. Email already stored: skipped, nothing recorded.
//! 3. Age outside 18..=99: failed with `age`.
//! 4. Otherwise written; a store fault fails the row with the fault text.

mod error;
mod pipeline;
mod runner;

pub use error::{Result, RunError};
pub use pipeline::{load_countries, run_with_options};
pub use runner::{Candidates, MigrationRunner, RunOutcome, collect_candidates};
