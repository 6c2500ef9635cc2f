//! Row normalization for the customer migration.
//!
//! Normalization is permissive: it never rejects a row. Business rules are
//! applied later by the validator.

mod fields;
mod normalizer;

pub use fields::{parse_age, split_name};
pub use normalizer::RowNormalizer;
