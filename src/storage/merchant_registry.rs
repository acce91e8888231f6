use crate::storage::errors::RegistryError;
use crate::storage::{lock, SnapshotStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::debug;

const DEFAULT_FRAUDULENT: [&str; 3] = ["ScamStore", "FakeElectronics", "ShadyBank"];
const DEFAULT_WHITELISTED: [&str; 9] = [
    "Amazon", "Walmart", "BestBuy", "Target", "Apple Store", "Netflix", "McDonald's", "Uber", "eBay"
];

/// Immutable view of the fraud list and the whitelist.
///
/// Merchant names are matched exactly: no case folding, no whitespace normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MerchantLists {
    fraudulent: HashSet<String>,
    whitelisted: HashSet<String>
}

impl MerchantLists {
    pub fn is_fraudulent(&self, merchant: &str) -> bool {
        self.fraudulent.contains(merchant)
    }

    /// A merchant on the fraud list never counts as whitelisted.
    pub fn is_whitelisted(&self, merchant: &str) -> bool {
        self.whitelisted.contains(merchant) && !self.fraudulent.contains(merchant)
    }

    pub fn fraudulent_count(&self) -> usize {
        self.fraudulent.len()
    }

    pub fn whitelisted_count(&self) -> usize {
        self.whitelisted.len()
    }
}

/// Shared, mutable registry of fraudulent and whitelisted merchants.
///
/// Mutations clone the current lists only while a snapshot is still held by an in-flight
/// evaluation; otherwise they update in place.
#[derive(Debug, Default)]
pub struct MerchantRegistry {
    lists: Mutex<Arc<MerchantLists>>
}

impl MerchantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the registry with the stock fraud list and whitelist.
    pub fn with_defaults() -> Self {
        let lists = MerchantLists {
            fraudulent: DEFAULT_FRAUDULENT.iter().map(|name| name.to_string()).collect(),
            whitelisted: DEFAULT_WHITELISTED.iter().map(|name| name.to_string()).collect()
        };

        Self {
            lists: Mutex::new(Arc::new(lists))
        }
    }

    /// Adds a merchant to the fraud list, taking it off the whitelist. Adding twice is a no-op.
    pub fn add_fraudulent(&self, merchant: &str) -> Result<(), RegistryError> {
        let merchant = check_name(merchant)?;
        let mut guard = lock(&self.lists);
        let lists = Arc::make_mut(&mut guard);

        lists.whitelisted.remove(merchant);
        if lists.fraudulent.insert(merchant.to_string()) {
            debug!("Merchant [{merchant}] added to fraud list");
        }

        Ok(())
    }

    /// Removes a merchant from the fraud list. Removing an absent merchant is a no-op.
    pub fn remove_fraudulent(&self, merchant: &str) -> Result<(), RegistryError> {
        let merchant = check_name(merchant)?;
        let mut guard = lock(&self.lists);

        if guard.fraudulent.contains(merchant) {
            Arc::make_mut(&mut guard).fraudulent.remove(merchant);
            debug!("Merchant [{merchant}] removed from fraud list");
        }

        Ok(())
    }

    /// Adds a merchant to the whitelist, taking it off the fraud list. Adding twice is a no-op.
    pub fn add_whitelisted(&self, merchant: &str) -> Result<(), RegistryError> {
        let merchant = check_name(merchant)?;
        let mut guard = lock(&self.lists);
        let lists = Arc::make_mut(&mut guard);

        lists.fraudulent.remove(merchant);
        if lists.whitelisted.insert(merchant.to_string()) {
            debug!("Merchant [{merchant}] added to whitelist");
        }

        Ok(())
    }

    /// Removes a merchant from the whitelist. Removing an absent merchant is a no-op.
    pub fn remove_whitelisted(&self, merchant: &str) -> Result<(), RegistryError> {
        let merchant = check_name(merchant)?;
        let mut guard = lock(&self.lists);

        if guard.whitelisted.contains(merchant) {
            Arc::make_mut(&mut guard).whitelisted.remove(merchant);
            debug!("Merchant [{merchant}] removed from whitelist");
        }

        Ok(())
    }
}

impl SnapshotStore for MerchantRegistry {
    type Snapshot = MerchantLists;

    fn snapshot(&self) -> Arc<MerchantLists> {
        lock(&self.lists).clone()
    }
}

fn check_name(merchant: &str) -> Result<&str, RegistryError> {
    if merchant.trim().is_empty() {
        return Err(RegistryError::EmptyMerchantName);
    }

    Ok(merchant)
}
