//! Data model shared by the customer migration crates.

pub mod customer;
pub mod fields;
pub mod options;
pub mod outcome;
pub mod source;

pub use customer::{CandidateCustomer, Field, PersistedCustomer, ValidCustomer};
pub use options::{CountryDataSource, DomainCheckMode, MigrationOptions};
pub use outcome::{FailedRow, MigrationSummary, RowOutcome};
pub use source::{SourceHeader, SourceRow};
