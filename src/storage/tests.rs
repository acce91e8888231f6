use super::{CreditLimitStore, MerchantRegistry, RegistryError, SnapshotStore};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;

#[test]
fn test_registry_defaults_cover_fraud_and_whitelist() {
    let lists = MerchantRegistry::with_defaults().snapshot();

    assert!(lists.is_fraudulent("ScamStore"));
    assert!(lists.is_fraudulent("ShadyBank"));
    assert!(lists.is_whitelisted("Apple Store"));
    assert!(lists.is_whitelisted("McDonald's"));
    assert_eq!(lists.fraudulent_count(), 3);
    assert_eq!(lists.whitelisted_count(), 9);
}

#[test]
fn test_registry_add_and_remove_are_idempotent() -> Result<()> {
    let registry = MerchantRegistry::new();

    registry.add_fraudulent("ScamStore")?;
    registry.add_fraudulent("ScamStore")?;
    assert_eq!(registry.snapshot().fraudulent_count(), 1);

    registry.remove_fraudulent("ScamStore")?;
    registry.remove_fraudulent("ScamStore")?;
    assert!(!registry.snapshot().is_fraudulent("ScamStore"));

    registry.remove_whitelisted("NeverAdded")?;
    assert_eq!(registry.snapshot().whitelisted_count(), 0);

    Ok(())
}

#[test]
fn test_registry_keeps_lists_mutually_exclusive() -> Result<()> {
    let registry = MerchantRegistry::new();

    registry.add_whitelisted("CornerShop")?;
    registry.add_fraudulent("CornerShop")?;

    let lists = registry.snapshot();
    assert!(lists.is_fraudulent("CornerShop"));
    assert!(!lists.is_whitelisted("CornerShop"));
    assert_eq!(lists.whitelisted_count(), 0);

    registry.add_whitelisted("CornerShop")?;

    let lists = registry.snapshot();
    assert!(!lists.is_fraudulent("CornerShop"));
    assert!(lists.is_whitelisted("CornerShop"));

    Ok(())
}

#[test]
fn test_registry_matches_names_exactly() -> Result<()> {
    let registry = MerchantRegistry::new();
    registry.add_fraudulent("ScamStore")?;

    let lists = registry.snapshot();
    assert!(!lists.is_fraudulent("scamstore"));
    assert!(!lists.is_fraudulent("ScamStore "));

    Ok(())
}

#[test]
fn test_registry_rejects_empty_names() {
    let registry = MerchantRegistry::new();

    assert_eq!(registry.add_fraudulent(""), Err(RegistryError::EmptyMerchantName));
    assert_eq!(registry.add_whitelisted("   "), Err(RegistryError::EmptyMerchantName));
    assert_eq!(registry.remove_fraudulent(""), Err(RegistryError::EmptyMerchantName));
    assert_eq!(registry.remove_whitelisted(""), Err(RegistryError::EmptyMerchantName));
}

#[test]
fn test_registry_snapshot_is_isolated_from_later_mutation() -> Result<()> {
    let registry = MerchantRegistry::new();
    registry.add_fraudulent("ScamStore")?;

    let before = registry.snapshot();
    registry.remove_fraudulent("ScamStore")?;
    registry.add_fraudulent("FakeElectronics")?;

    assert!(before.is_fraudulent("ScamStore"));
    assert!(!before.is_fraudulent("FakeElectronics"));

    let after = registry.snapshot();
    assert!(!after.is_fraudulent("ScamStore"));
    assert!(after.is_fraudulent("FakeElectronics"));

    Ok(())
}

#[test]
fn test_credit_limit_upsert_and_lookup() -> Result<()> {
    let store = CreditLimitStore::with_defaults();

    assert_eq!(store.snapshot().get("U234"), Some(Decimal::from(5_000)));
    assert_eq!(store.snapshot().get("U999"), None);

    store.upsert("U234", Decimal::from(8_000))?;
    store.upsert("U999", Decimal::from(100))?;

    let limits = store.snapshot();
    assert_eq!(limits.get("U234"), Some(Decimal::from(8_000)));
    assert_eq!(limits.get("U999"), Some(Decimal::from(100)));
    assert_eq!(limits.len(), 5);

    Ok(())
}

#[test]
fn test_credit_limit_upsert_validates_input() {
    let store = CreditLimitStore::new();

    assert_eq!(store.upsert("", Decimal::from(10)), Err(RegistryError::EmptyUserId));
    assert!(matches!(store.upsert("U1", Decimal::ZERO), Err(RegistryError::NonPositiveCreditLimit { .. })));
    assert!(matches!(store.upsert("U1", Decimal::from(-5)), Err(RegistryError::NonPositiveCreditLimit { .. })));
    assert!(store.snapshot().is_empty());
}

#[test]
fn test_concurrent_mutation_never_changes_held_snapshots() -> Result<()> {
    let registry = Arc::new(MerchantRegistry::with_defaults());
    let limits = Arc::new(CreditLimitStore::with_defaults());
    let held_lists = registry.snapshot();
    let held_limits = limits.snapshot();

    let writers: Vec<_> = (0..4).map(|worker| {
        let registry = registry.clone();
        let limits = limits.clone();

        thread::spawn(move || -> Result<(), RegistryError> {
            for index in 0..50 {
                let merchant = format!("Shop-{worker}-{index}");
                registry.add_fraudulent(&merchant)?;
                registry.add_whitelisted(&merchant)?;
                limits.upsert(&format!("U-{worker}-{index}"), Decimal::from(index + 1))?;
            }
            Ok(())
        })
    }).collect();

    for writer in writers {
        writer.join().map_err(|_| anyhow!("writer thread panicked"))??;
    }

    assert_eq!(held_lists.fraudulent_count(), 3);
    assert_eq!(held_lists.whitelisted_count(), 9);
    assert_eq!(held_limits.len(), 4);

    let lists = registry.snapshot();
    assert_eq!(lists.fraudulent_count(), 3);
    assert_eq!(lists.whitelisted_count(), 9 + 200);
    assert_eq!(limits.snapshot().len(), 4 + 200);

    Ok(())
}
