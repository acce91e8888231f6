use crate::models::{FraudReport, RuleName, RuleTrigger, Transaction};
use crate::types::TransactionId;
use std::collections::{BTreeMap, HashMap};

/// Unions rule triggers into one report per flagged transaction.
///
/// Reports follow the batch's input order. Within a report each rule appears once, in
/// catalogue order, paired with the first reason it gave. Nothing is filtered: a transaction
/// with at least one trigger is reported, one without is not.
pub fn merge_triggers<I>(batch: &[Transaction], triggers: I) -> Vec<FraudReport>
where
    I: IntoIterator<Item = RuleTrigger>
{
    let mut fired = HashMap::<TransactionId, BTreeMap<RuleName, String>>::new();

    for trigger in triggers {
        fired.entry(trigger.transaction_id)
            .or_default()
            .entry(trigger.rule)
            .or_insert(trigger.detail);
    }

    batch.iter()
        .filter_map(|transaction| {
            let rules = fired.remove(&transaction.transaction_id)?;
            let (triggered_rules, reasons) = rules.into_iter().unzip();

            Some(FraudReport {
                transaction: transaction.clone(),
                triggered_rules,
                reasons
            })
        })
        .collect()
}
