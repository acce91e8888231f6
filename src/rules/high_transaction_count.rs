use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};
use crate::types::describe_window;
use crate::window::{GroupKey, WindowAggregator};

/// Flags users making more transactions than allowed within the count window.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighTransactionCountRule;

impl Rule for HighTransactionCountRule {
    fn name(&self) -> RuleName {
        RuleName::HighTransactionCount
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        let config = &context.config;
        let limit = config.high_count_limit;
        let window = describe_window(config.high_count_window);

        WindowAggregator::new(GroupKey::User, config.high_count_window)
            .aggregate(&context.batch)
            .breaches(|stat| stat.count > limit)
            .into_iter()
            .map(|breach| {
                let detail = format!(
                    "user [{}] made {} transactions within {}, limit {}",
                    breach.key, breach.stat.count, window, limit
                );
                RuleTrigger::new(&context.batch[breach.index], self.name(), detail)
            })
            .collect()
    }
}
