//! Country resolution for customer locations.
//!
//! Two reference documents keyed by ISO2 code (ISO3 codes and display
//! names) are joined into a [`CountryTable`] that maps a country name to its
//! ISO3 code. The documents come from a [`CountrySource`], so callers can
//! swap the network fetch for local files or fixed data.

mod error;
mod source;
mod table;

pub use error::{CountryError, Result};
pub use source::{
    CountryData, CountrySource, DirectoryCountrySource, HttpCountrySource, ISO3_FILE, NAMES_FILE,
    StaticCountrySource, source_for, write_directory,
};
pub use table::CountryTable;
