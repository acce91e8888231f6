use crate::models::Transaction;
use chrono::TimeDelta;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The field transactions are grouped by before windows are computed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GroupKey {
    User,
    Merchant
}

impl GroupKey {
    pub fn of<'a>(&self, transaction: &'a Transaction) -> &'a str {
        match self {
            GroupKey::User => &transaction.user_id,
            GroupKey::Merchant => &transaction.merchant
        }
    }
}

/// Count and amount sum of one trailing window `[t - W, t]`.
///
/// A sum too large for a `Decimal` is held at `Decimal::MAX`, which still exceeds any threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowStat {
    pub count: usize,
    pub sum: Decimal,
    /// Position (within the group's time order) of the oldest member.
    start: usize
}

#[derive(Debug, Clone)]
struct WindowGroup {
    key: String,
    /// Batch indices of the group, sorted by timestamp then input order.
    order: Vec<usize>,
    /// `stats[i]` is the window ending at `order[i]`.
    stats: Vec<WindowStat>
}

/// Computes trailing windows of a fixed length over a batch grouped by user or merchant.
#[derive(Debug, Clone, Copy)]
pub struct WindowAggregator {
    key: GroupKey,
    window: TimeDelta
}

impl WindowAggregator {
    pub fn new(key: GroupKey, window: TimeDelta) -> Self {
        Self { key, window }
    }

    pub fn aggregate(&self, batch: &[Transaction]) -> WindowAggregates {
        self.aggregate_where(batch, |_| true)
    }

    /// Aggregates only the transactions accepted by `include`; the rest are neither windowed
    /// nor counted in anyone else's window.
    ///
    /// Each group is sorted once (stable, so equal timestamps keep input order) and then swept
    /// with two pointers: the right one visits every transaction, the left one drops members
    /// older than `t - W`. A member exactly `W` before `t` stays in the window.
    pub fn aggregate_where<F>(&self, batch: &[Transaction], include: F) -> WindowAggregates
    where
        F: Fn(&Transaction) -> bool
    {
        let mut grouped = HashMap::<&str, Vec<usize>>::new();
        let mut keys = Vec::new();

        for (index, transaction) in batch.iter().enumerate() {
            let key = self.key.of(transaction);

            if key.is_empty() || !include(transaction) {
                continue;
            }

            grouped.entry(key)
                .or_insert_with(|| {
                    keys.push(key);
                    Vec::new()
                })
                .push(index);
        }

        let mut positions = vec![None; batch.len()];
        let mut groups = Vec::with_capacity(keys.len());

        for key in keys {
            let mut order = grouped.remove(key).unwrap_or_default();
            order.sort_by_key(|&index| batch[index].timestamp);

            let stats = self.sweep(batch, &order);

            for (position, &index) in order.iter().enumerate() {
                positions[index] = Some((groups.len(), position));
            }

            groups.push(WindowGroup { key: key.to_string(), order, stats });
        }

        WindowAggregates { groups, positions }
    }

    fn sweep(&self, batch: &[Transaction], order: &[usize]) -> Vec<WindowStat> {
        let mut stats = Vec::with_capacity(order.len());
        let mut left = 0;
        //NOTE: `None` once the running sum has overflowed; it is rebuilt from the members until it fits again.
        let mut sum = Some(Decimal::ZERO);

        for (right, &index) in order.iter().enumerate() {
            let current = &batch[index];
            sum = sum.and_then(|sum| sum.checked_add(current.amount));

            //NOTE: An underflowing window start means the window reaches back past every representable instant.
            if let Some(window_start) = current.timestamp.checked_sub_signed(self.window) {
                while left < right && batch[order[left]].timestamp < window_start {
                    sum = sum.and_then(|sum| sum.checked_sub(batch[order[left]].amount));
                    left += 1;
                }
            }

            if sum.is_none() {
                sum = exact_sum(batch, &order[left..=right]);
            }

            stats.push(WindowStat {
                count: right - left + 1,
                sum: sum.unwrap_or(Decimal::MAX),
                start: left
            });
        }

        stats
    }
}

/// Sum of the given members' amounts, `None` if it does not fit in a `Decimal`.
fn exact_sum(batch: &[Transaction], members: &[usize]) -> Option<Decimal> {
    members.iter().try_fold(Decimal::ZERO, |sum, &index| sum.checked_add(batch[index].amount))
}

/// A transaction swept up by a window that met a rule's condition.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBreach<'a> {
    /// Batch index of the flagged member.
    pub index: usize,
    /// Batch index of the transaction the breaching window ends at.
    pub anchor: usize,
    pub key: &'a str,
    pub stat: &'a WindowStat
}

/// Per-transaction trailing windows for every group of one aggregation pass.
#[derive(Debug, Clone)]
pub struct WindowAggregates {
    groups: Vec<WindowGroup>,
    /// Batch index to (group, position in group order); `None` for excluded transactions.
    positions: Vec<Option<(usize, usize)>>
}

impl WindowAggregates {
    /// The window ending at the given batch index.
    pub fn get(&self, index: usize) -> Option<&WindowStat> {
        let (group, position) = (*self.positions.get(index)?)?;
        self.groups[group].stats.get(position)
    }

    /// Batch indices inside the window ending at the given batch index, oldest first.
    pub fn members(&self, index: usize) -> &[usize] {
        let Some(Some((group, position))) = self.positions.get(index).copied() else {
            return &[];
        };

        let group = &self.groups[group];
        &group.order[group.stats[position].start..=position]
    }

    /// Every member of every window satisfying `predicate`, each reported once.
    ///
    /// A member covered by several breaching windows is attributed to the earliest one.
    /// Window starts only move forward within a group, so each group is walked once.
    pub fn breaches<P>(&self, predicate: P) -> Vec<WindowBreach<'_>>
    where
        P: Fn(&WindowStat) -> bool
    {
        let mut breaches = Vec::new();

        for group in &self.groups {
            let mut flagged_until = 0;

            for (position, stat) in group.stats.iter().enumerate() {
                if !predicate(stat) {
                    continue;
                }

                let anchor = group.order[position];

                for member in stat.start.max(flagged_until)..=position {
                    breaches.push(WindowBreach {
                        index: group.order[member],
                        anchor,
                        key: &group.key,
                        stat
                    });
                }

                flagged_until = position + 1;
            }
        }

        breaches
    }
}
