use thiserror::Error;

use custmig_model::Field;

/// A business rule rejected a candidate.
///
/// The display text is the bare field name, which is what the error report
/// records as the failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidField(Field),
}

impl ValidationError {
    pub const fn field(&self) -> Field {
        match self {
            Self::InvalidField(field) => *field,
        }
    }
}

/// The domain checker could not be set up.
#[derive(Debug, Error)]
pub enum DomainCheckError {
    #[error("failed to initialize DNS resolver: {0}")]
    Resolver(#[from] std::io::Error),
}
