use custmig_model::{PersistedCustomer, ValidCustomer};

use crate::error::{Result, StoreError};

/// Persistence contract used by the migration runner.
pub trait CustomerStore {
    /// True when a customer with exactly this email is stored.
    fn exists(&self, email: &str) -> Result<bool>;

    /// Writes a validated customer. Empty locations are stored as `Unknown`.
    fn create(&mut self, customer: &ValidCustomer) -> Result<PersistedCustomer>;

    /// Number of stored customers.
    fn count(&self) -> Result<usize>;
}

/// Vector-backed store with the same uniqueness rule as the database.
#[derive(Debug, Clone, Default)]
pub struct MemoryCustomerStore {
    customers: Vec<PersistedCustomer>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> &[PersistedCustomer] {
        &self.customers
    }
}

impl CustomerStore for MemoryCustomerStore {
    fn exists(&self, email: &str) -> Result<bool> {
        Ok(self.customers.iter().any(|c| c.email == email))
    }

    fn create(&mut self, customer: &ValidCustomer) -> Result<PersistedCustomer> {
        if self.exists(&customer.email)? {
            return Err(StoreError::UniqueViolation {
                email: customer.email.clone(),
            });
        }
        let id = i64::try_from(self.customers.len()).unwrap_or(i64::MAX - 1) + 1;
        let persisted = PersistedCustomer::from_valid(id, customer);
        self.customers.push(persisted.clone());
        Ok(persisted)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.customers.len())
    }
}
