use custmig_model::fields::AGE_RANGE;
use custmig_model::{CandidateCustomer, DomainCheckMode, Field, ValidCustomer};
use validator::ValidateEmail;

use crate::domain::{DnsDomainCheck, DomainCheck, SkipDomainCheck};
use crate::error::{DomainCheckError, ValidationError};

/// Business rules a candidate must satisfy before it is written.
///
/// Rules are checked in a fixed order (email, then age) so the first
/// violated field is the one reported.
pub struct CustomerValidator {
    domain_check: Box<dyn DomainCheck>,
}

impl CustomerValidator {
    pub fn new(domain_check: Box<dyn DomainCheck>) -> Self {
        Self { domain_check }
    }

    /// Validator that checks email syntax only.
    pub fn syntax_only() -> Self {
        Self::new(Box::new(SkipDomainCheck))
    }

    /// Builds the validator selected by `mode`.
    pub fn for_mode(mode: DomainCheckMode) -> Result<Self, DomainCheckError> {
        match mode {
            DomainCheckMode::Dns => Ok(Self::new(Box::new(DnsDomainCheck::from_system_conf()?))),
            DomainCheckMode::Skip => Ok(Self::syntax_only()),
        }
    }

    /// Email must be present, syntactically valid and on a mail-capable domain.
    pub fn check_email(&self, email: &str) -> Result<(), ValidationError> {
        let invalid = ValidationError::InvalidField(Field::Email);
        if email.is_empty() || !email.validate_email() {
            return Err(invalid);
        }
        let Some((_, domain)) = email.rsplit_once('@') else {
            return Err(invalid);
        };
        if !self.domain_check.accepts(domain) {
            return Err(invalid);
        }
        Ok(())
    }

    /// Age must fall within [`AGE_RANGE`].
    pub fn check_age(&self, age: i64) -> Result<u8, ValidationError> {
        if !AGE_RANGE.contains(&age) {
            return Err(ValidationError::InvalidField(Field::Age));
        }
        u8::try_from(age).map_err(|_| ValidationError::InvalidField(Field::Age))
    }

    /// Applies every rule and produces the record to write.
    pub fn validate(&self, candidate: &CandidateCustomer) -> Result<ValidCustomer, ValidationError> {
        self.check_email(&candidate.email)?;
        let age = self.check_age(candidate.age)?;
        Ok(ValidCustomer {
            name: candidate.name.clone(),
            surname: candidate.surname.clone(),
            email: candidate.email.clone(),
            age,
            location: candidate.location.clone(),
            country_code: candidate.country_code.clone(),
        })
    }
}
