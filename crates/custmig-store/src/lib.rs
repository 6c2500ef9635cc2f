//! Customer persistence for the migration.

mod error;
mod sqlite;
mod store;

pub use error::{Result, StoreError};
pub use sqlite::SqliteCustomerStore;
pub use store::{CustomerStore, MemoryCustomerStore};
