use crate::storage::errors::RegistryError;
use crate::storage::{lock, SnapshotStore};
use crate::types::UserId;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

const DEFAULT_LIMITS: [(&str, i64); 4] = [
    ("U123", 10_000),
    ("U234", 5_000),
    ("U345", 7_000),
    ("U456", 15_000)
];

/// Immutable view of per-user credit limits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditLimits {
    limits: HashMap<UserId, Decimal>
}

impl CreditLimits {
    /// Users without a stored limit yield `None`; credit-based checks do not apply to them.
    pub fn get(&self, user_id: &str) -> Option<Decimal> {
        self.limits.get(user_id).copied()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

/// Shared, mutable mapping of user to credit limit.
#[derive(Debug, Default)]
pub struct CreditLimitStore {
    limits: Mutex<Arc<CreditLimits>>
}

impl CreditLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with the stock per-user limits.
    pub fn with_defaults() -> Self {
        let limits = DEFAULT_LIMITS.iter()
            .map(|(user_id, limit)| (user_id.to_string(), Decimal::from(*limit)))
            .collect();

        Self {
            limits: Mutex::new(Arc::new(CreditLimits { limits }))
        }
    }

    /// Inserts or replaces the credit limit for a user.
    pub fn upsert(&self, user_id: &str, credit_limit: Decimal) -> Result<(), RegistryError> {
        if user_id.trim().is_empty() {
            return Err(RegistryError::EmptyUserId);
        }

        if credit_limit <= Decimal::ZERO {
            return Err(RegistryError::NonPositiveCreditLimit {
                user_id: user_id.to_string(),
                credit_limit
            });
        }

        let mut guard = lock(&self.limits);
        Arc::make_mut(&mut guard).limits.insert(user_id.to_string(), credit_limit);
        debug!("Credit limit for user [{user_id}] set to {credit_limit}");

        Ok(())
    }
}

impl SnapshotStore for CreditLimitStore {
    type Snapshot = CreditLimits;

    fn snapshot(&self) -> Arc<CreditLimits> {
        lock(&self.limits).clone()
    }
}
