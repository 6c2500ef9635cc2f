//! Recognized source header keys and stored column names.

/// Source key that is never stored.
pub const FIELD_KEY_ID: &str = "id";
/// Source key holding "first last"; split into name and surname.
pub const FIELD_KEY_NAME: &str = "name";
/// Source key holding the age, possibly quoted.
pub const FIELD_KEY_AGE: &str = "age";
/// Source key holding a free-text country name.
pub const FIELD_KEY_LOCATION: &str = "location";
/// Source key holding the customer email.
pub const FIELD_KEY_EMAIL: &str = "email";

/// Stored column named by an email failure reason.
pub const TABLE_FIELD_EMAIL: &str = "email";
/// Stored column named by an age failure reason.
pub const TABLE_FIELD_AGE: &str = "age";

/// Stored in place of an empty location.
pub const LOCATION_UNKNOWN: &str = "Unknown";

/// Trailing column appended to the error report header.
pub const ERROR_COLUMN: &str = "error";

/// Inclusive age bounds accepted for persistence.
pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 18..=99;
