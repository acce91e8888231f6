mod credit_limit_store;
mod errors;
mod merchant_registry;
#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use credit_limit_store::{CreditLimitStore, CreditLimits};
pub use errors::RegistryError;
pub use merchant_registry::{MerchantLists, MerchantRegistry};

/// A shared reference store the engine reads through.
///
/// `snapshot` hands out an immutable view that later mutations never touch, so one batch
/// evaluation sees a single consistent version of the store.
pub trait SnapshotStore: Send + Sync + 'static {
    type Snapshot: Send + Sync + 'static;

    fn snapshot(&self) -> Arc<Self::Snapshot>;
}

//NOTE: Writers only replace or clone-and-modify the Arc'd contents, a panic mid-update cannot leave
//      a half-applied value behind, so a poisoned lock is safe to keep using.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
