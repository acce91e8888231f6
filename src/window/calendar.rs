use crate::models::Transaction;
use crate::window::GroupKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// All transactions of one key on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub key: String,
    /// Midnight-to-midnight in the offset each timestamp carries.
    pub day: NaiveDate,
    /// Held at `Decimal::MAX` if the day's amounts overflow.
    pub total: Decimal,
    /// Batch indices in input order.
    pub members: Vec<usize>
}

/// Buckets a batch by key and calendar day, in order of each bucket's first appearance.
pub fn daily_buckets(batch: &[Transaction], key: GroupKey) -> Vec<DailyBucket> {
    let mut lookup = HashMap::<(&str, NaiveDate), usize>::new();
    let mut buckets = Vec::<DailyBucket>::new();

    for (index, transaction) in batch.iter().enumerate() {
        let group = key.of(transaction);

        if group.is_empty() {
            continue;
        }

        let day = transaction.timestamp.date_naive();
        let slot = *lookup.entry((group, day)).or_insert_with(|| {
            buckets.push(DailyBucket {
                key: group.to_string(),
                day,
                total: Decimal::ZERO,
                members: Vec::new()
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[slot];
        bucket.total = bucket.total.saturating_add(transaction.amount);
        bucket.members.push(index);
    }

    buckets
}
