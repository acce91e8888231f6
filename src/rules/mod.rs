mod credit_history;
mod fraudulent_merchant;
mod high_amount;
mod high_transaction_count;
mod rapid_fire;
mod total_spending;
mod whitelist_merchant;

use std::sync::Arc;

use crate::config::RuleConfig;
use crate::models::{RuleName, RuleTrigger, Transaction};
use crate::storage::{CreditLimits, MerchantLists};

pub use credit_history::CreditHistoryRule;
pub use fraudulent_merchant::FraudulentMerchantRule;
pub use high_amount::HighAmountRule;
pub use high_transaction_count::HighTransactionCountRule;
pub use rapid_fire::RapidFireRule;
pub use total_spending::TotalSpendingRule;
pub use whitelist_merchant::WhitelistMerchantRule;

/// Everything a rule may read during one batch evaluation.
///
/// Cloning is cheap: the batch, both store snapshots and the config are shared, which lets
/// rules run on separate threads against the same immutable state.
#[derive(Debug, Clone)]
pub struct RuleContext {
    pub batch: Arc<[Transaction]>,
    pub merchants: Arc<MerchantLists>,
    pub credit_limits: Arc<CreditLimits>,
    pub config: Arc<RuleConfig>
}

/// A single, independent fraud check over a whole batch.
pub trait Rule: Send + Sync + 'static {
    fn name(&self) -> RuleName;

    /// Returns one trigger per transaction the rule fires for. Must not depend on any other rule.
    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger>;
}

/// The fixed rule catalogue, in reporting order.
pub fn catalogue() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(HighAmountRule),
        Arc::new(TotalSpendingRule),
        Arc::new(FraudulentMerchantRule),
        Arc::new(HighTransactionCountRule),
        Arc::new(WhitelistMerchantRule),
        Arc::new(CreditHistoryRule),
        Arc::new(RapidFireRule)
    ]
}
