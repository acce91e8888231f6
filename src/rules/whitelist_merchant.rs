use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};
use crate::types::describe_window;
use crate::window::{GroupKey, WindowAggregator};

/// Flags bursts of transactions at merchants that are not whitelisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitelistMerchantRule;

impl Rule for WhitelistMerchantRule {
    fn name(&self) -> RuleName {
        RuleName::WhitelistMerchant
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        let config = &context.config;
        let limit = config.whitelist_count_limit;
        let window = describe_window(config.whitelist_window);

        WindowAggregator::new(GroupKey::Merchant, config.whitelist_window)
            .aggregate_where(&context.batch, |transaction| !context.merchants.is_whitelisted(&transaction.merchant))
            .breaches(|stat| stat.count > limit)
            .into_iter()
            .map(|breach| {
                let detail = format!(
                    "non-whitelisted merchant [{}] received {} transactions within {}, limit {}",
                    breach.key, breach.stat.count, window, limit
                );
                RuleTrigger::new(&context.batch[breach.index], self.name(), detail)
            })
            .collect()
    }
}
