mod domain;
mod error;
mod validator;

pub use domain::{
    DnsDomainCheck, DnsLookup, DomainCheck, NULL_MX_HOST, SkipDomainCheck, accepts_mail,
};
pub use error::{DomainCheckError, ValidationError};
pub use validator::CustomerValidator;
