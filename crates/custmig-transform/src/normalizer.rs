use custmig_countries::CountryTable;
use custmig_model::fields::{
    FIELD_KEY_AGE, FIELD_KEY_EMAIL, FIELD_KEY_ID, FIELD_KEY_LOCATION, FIELD_KEY_NAME,
};
use custmig_model::{CandidateCustomer, SourceHeader, SourceRow};
use tracing::trace;

use crate::fields::{parse_age, split_name};

/// Turns header-keyed source rows into candidate customers.
pub struct RowNormalizer<'a> {
    header: &'a SourceHeader,
    countries: &'a CountryTable,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(header: &'a SourceHeader, countries: &'a CountryTable) -> Self {
        Self { header, countries }
    }

    /// Normalizes one row.
    ///
    /// Returns `None` when the row carries no customer fields: every cell is
    /// blank, or the header has no key other than `id`. Missing trailing cells
    /// read as empty; cells beyond the header are ignored here but stay in
    /// `src_data`.
    pub fn normalize(&self, row: SourceRow) -> Option<CandidateCustomer> {
        if row.is_blank() {
            return None;
        }
        let mut customer = CandidateCustomer::default();
        let mut has_fields = false;
        for (index, key) in self.header.keys().iter().enumerate() {
            let cell = row.cell(index);
            match key.as_str() {
                FIELD_KEY_ID => continue,
                FIELD_KEY_NAME => {
                    (customer.name, customer.surname) = split_name(cell);
                }
                FIELD_KEY_AGE => customer.age = parse_age(cell),
                FIELD_KEY_LOCATION => {
                    let code = self.countries.resolve(cell);
                    customer.country_code = code.to_string();
                    customer.location = if code.is_empty() {
                        String::new()
                    } else {
                        cell.to_string()
                    };
                }
                FIELD_KEY_EMAIL => customer.email = cell.to_string(),
                other => {
                    customer.extra.insert(other.to_string(), cell.to_string());
                }
            }
            has_fields = true;
        }
        if !has_fields {
            return None;
        }
        trace!(
            record = row.record,
            country_code = %customer.country_code,
            age = customer.age,
            "row normalized"
        );
        customer.src_data = row;
        Some(customer)
    }
}
