//! Customer shapes at each pipeline stage.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::{LOCATION_UNKNOWN, TABLE_FIELD_AGE, TABLE_FIELD_EMAIL};
use crate::source::SourceRow;

/// A normalized, not yet validated customer derived from one source row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateCustomer {
    pub name: String,
    pub surname: String,
    pub email: String,
    /// Permissively parsed; non-numeric input becomes 0.
    pub age: i64,
    /// Empty when the country was not recognized.
    pub location: String,
    pub country_code: String,
    /// Unrecognized header keys, copied verbatim. Not persisted.
    pub extra: BTreeMap<String, String>,
    /// The originating row, kept for the error report.
    pub src_data: SourceRow,
}

/// A customer that passed validation and may be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidCustomer {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub age: u8,
    pub location: String,
    pub country_code: String,
}

impl ValidCustomer {
    /// Location as written to the store; empty becomes `Unknown`.
    pub fn stored_location(&self) -> &str {
        if self.location.is_empty() {
            LOCATION_UNKNOWN
        } else {
            &self.location
        }
    }
}

/// A customer row as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCustomer {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub age: u8,
    pub location: String,
    pub country_code: String,
}

impl PersistedCustomer {
    /// Builds the stored form of a validated customer.
    pub fn from_valid(id: i64, customer: &ValidCustomer) -> Self {
        Self {
            id,
            name: customer.name.clone(),
            surname: customer.surname.clone(),
            email: customer.email.clone(),
            age: customer.age,
            location: customer.stored_location().to_string(),
            country_code: customer.country_code.clone(),
        }
    }
}

/// Field a business rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Age,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => TABLE_FIELD_EMAIL,
            Self::Age => TABLE_FIELD_AGE,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
