//! Case-insensitive country name to ISO3 lookup.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::source::{CountryData, CountrySource};

/// Lookup from lower-cased, trimmed country name to ISO3 code.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryTable {
    by_name: BTreeMap<String, String>,
}

impl CountryTable {
    /// Fetches the reference documents and joins them on ISO2 code.
    pub fn build(source: &dyn CountrySource) -> Result<Self> {
        let start = Instant::now();
        let data = source.fetch()?;
        let table = Self::from_data(&data);
        info!(
            countries = table.len(),
            duration_ms = start.elapsed().as_millis(),
            "country table built"
        );
        Ok(table)
    }

    /// Joins ISO3 codes with display names. Codes without a name are dropped.
    pub fn from_data(data: &CountryData) -> Self {
        let mut by_name = BTreeMap::new();
        for (iso2, iso3) in &data.iso3 {
            let Some(name) = data.names.get(iso2) else {
                debug!(iso2 = %iso2, "country code has no name; skipped");
                continue;
            };
            let key = lookup_key(name);
            if key.is_empty() {
                continue;
            }
            by_name.insert(key, iso3.clone());
        }
        Self { by_name }
    }

    /// ISO3 code for `country_name`, or an empty string when unknown.
    pub fn resolve(&self, country_name: &str) -> &str {
        self.by_name
            .get(&lookup_key(country_name))
            .map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Entries as `(normalized name, ISO3)`, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_name
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}
