//! Configuration options for a migration run.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default source of the ISO2 to ISO3 country code table.
pub const DEFAULT_ISO3_URL: &str = "http://country.io/iso3.json";

/// Default source of the ISO2 to display name table.
pub const DEFAULT_NAMES_URL: &str = "http://country.io/names.json";

/// Default SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "customers.sqlite3";

/// How email domains are checked after syntax validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCheckMode {
    /// Require MX or address records for the email domain.
    #[default]
    Dns,
    /// Accept any syntactically valid email.
    Skip,
}

/// Where the country reference data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryDataSource {
    /// Fetch both JSON documents over HTTP.
    Http {
        iso3_url: String,
        names_url: String,
    },
    /// Read `iso3.json` and `names.json` from a local directory.
    Directory(PathBuf),
}

impl Default for CountryDataSource {
    fn default() -> Self {
        Self::Http {
            iso3_url: DEFAULT_ISO3_URL.to_string(),
            names_url: DEFAULT_NAMES_URL.to_string(),
        }
    }
}

/// Options controlling a migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// SQLite database holding the customers table.
    pub database_path: PathBuf,
    /// Country reference data location.
    pub countries: CountryDataSource,
    /// Email domain check behavior.
    pub domain_check: DomainCheckMode,
    /// Timeout for each reference data request.
    #[serde(with = "duration_secs")]
    pub http_timeout: Duration,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            countries: CountryDataSource::default(),
            domain_check: DomainCheckMode::default(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl MigrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    #[must_use]
    pub fn with_countries(mut self, countries: CountryDataSource) -> Self {
        self.countries = countries;
        self
    }

    #[must_use]
    pub fn with_domain_check(mut self, mode: DomainCheckMode) -> Self {
        self.domain_check = mode;
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
