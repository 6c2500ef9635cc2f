//! Deliverability checks for email domains.

use std::collections::HashMap;
use std::sync::Mutex;

use hickory_resolver::Resolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use tracing::{debug, warn};

use crate::error::DomainCheckError;

/// Decides whether an email domain can receive mail.
pub trait DomainCheck {
    fn accepts(&self, domain: &str) -> bool;
}

/// Accepts every domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipDomainCheck;

impl DomainCheck for SkipDomainCheck {
    fn accepts(&self, _domain: &str) -> bool {
        true
    }
}

/// Mail host of a null MX record (RFC 7505).
pub const NULL_MX_HOST: &str = ".";

/// DNS queries needed to decide whether a domain accepts mail.
pub trait DnsLookup {
    /// Exchange hosts of the MX records for `fqdn`; empty when there are
    /// none or the query fails. A null MX appears as [`NULL_MX_HOST`].
    fn mx_hosts(&self, fqdn: &str) -> Vec<String>;

    /// Whether `fqdn` resolves to at least one address.
    fn has_address(&self, fqdn: &str) -> bool;
}

impl DnsLookup for Resolver {
    fn mx_hosts(&self, fqdn: &str) -> Vec<String> {
        match self.mx_lookup(fqdn) {
            Ok(records) => records
                .iter()
                .map(|mx| {
                    if mx.exchange().is_root() {
                        NULL_MX_HOST.to_string()
                    } else {
                        mx.exchange().to_ascii()
                    }
                })
                .collect(),
            Err(error) => {
                debug!(fqdn, %error, "no MX records");
                Vec::new()
            }
        }
    }

    fn has_address(&self, fqdn: &str) -> bool {
        match self.lookup_ip(fqdn) {
            Ok(addresses) => addresses.iter().next().is_some(),
            Err(error) => {
                debug!(fqdn, %error, "domain does not resolve");
                false
            }
        }
    }
}

/// Mail decision from the MX hosts of a domain.
///
/// Any real exchange accepts. Only null MX records reject. Without MX
/// records the domain must resolve to an address, which is only queried then.
pub fn accepts_mail(mx_hosts: &[String], has_address: impl FnOnce() -> bool) -> bool {
    if mx_hosts.is_empty() {
        return has_address();
    }
    mx_hosts.iter().any(|host| host != NULL_MX_HOST)
}

/// Looks the domain up in DNS.
///
/// A domain is accepted when it publishes an MX record that is not a null MX
/// (RFC 7505), or, lacking MX records, when it resolves to an address.
/// Answers are cached per lower-cased domain for the lifetime of the checker.
pub struct DnsDomainCheck<L = Resolver> {
    lookup: L,
    cache: Mutex<HashMap<String, bool>>,
}

impl DnsDomainCheck<Resolver> {
    /// Uses the system resolver configuration, falling back to defaults.
    pub fn from_system_conf() -> Result<Self, DomainCheckError> {
        let resolver = match Resolver::from_system_conf() {
            Ok(resolver) => resolver,
            Err(error) => {
                warn!(%error, "system resolver configuration unavailable; using defaults");
                Resolver::new(ResolverConfig::default(), ResolverOpts::default())?
            }
        };
        Ok(Self::with_lookup(resolver))
    }
}

impl<L: DnsLookup> DnsDomainCheck<L> {
    pub fn with_lookup(lookup: L) -> Self {
        Self {
            lookup,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn decide(&self, domain: &str) -> bool {
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        let mx_hosts = self.lookup.mx_hosts(&fqdn);
        let accepted = accepts_mail(&mx_hosts, || self.lookup.has_address(&fqdn));
        if !accepted && !mx_hosts.is_empty() {
            debug!(domain, "domain publishes a null MX");
        }
        accepted
    }
}

impl<L: DnsLookup> DomainCheck for DnsDomainCheck<L> {
    fn accepts(&self, domain: &str) -> bool {
        let key = domain.to_ascii_lowercase();
        if let Ok(cache) = self.cache.lock()
            && let Some(known) = cache.get(&key)
        {
            return *known;
        }
        let accepted = self.decide(&key);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, accepted);
        }
        accepted
    }
}
