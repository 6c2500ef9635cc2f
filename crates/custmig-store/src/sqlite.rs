//! SQLite-backed customer store.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use custmig_model::{PersistedCustomer, ValidCustomer};

use crate::error::{Result, StoreError};
use crate::store::CustomerStore;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    surname TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INTEGER NOT NULL,
    location TEXT NOT NULL,
    country_code TEXT NOT NULL
)";

/// Customers table in a SQLite database.
///
/// Email uniqueness uses SQLite's default BINARY collation, so the check is
/// exact and case-sensitive.
pub struct SqliteCustomerStore {
    conn: Connection,
}

impl SqliteCustomerStore {
    /// Opens (or creates) the database at `path` and ensures the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened customer database");
        Self::with_connection(conn)
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    /// All stored customers ordered by id.
    pub fn customers(&self) -> Result<Vec<PersistedCustomer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, surname, email, age, location, country_code
             FROM customers ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PersistedCustomer {
                id: row.get(0)?,
                name: row.get(1)?,
                surname: row.get(2)?,
                email: row.get(3)?,
                age: row.get(4)?,
                location: row.get(5)?,
                country_code: row.get(6)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::from)
    }
}

impl CustomerStore for SqliteCustomerStore {
    fn exists(&self, email: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM customers WHERE email = ?1 LIMIT 1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn create(&mut self, customer: &ValidCustomer) -> Result<PersistedCustomer> {
        self.conn.execute(
            "INSERT INTO customers (name, surname, email, age, location, country_code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                customer.name,
                customer.surname,
                customer.email,
                customer.age,
                customer.stored_location(),
                customer.country_code,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(PersistedCustomer::from_valid(id, customer))
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
