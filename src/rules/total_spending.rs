use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};
use crate::types::describe_window;
use crate::window::{GroupKey, WindowAggregator};

/// Flags every transaction in a user's rolling window whose spending exceeds the threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalSpendingRule;

impl Rule for TotalSpendingRule {
    fn name(&self) -> RuleName {
        RuleName::TotalSpending
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        let config = &context.config;
        let threshold = config.total_spending_threshold;
        let window = describe_window(config.total_spending_window);

        WindowAggregator::new(GroupKey::User, config.total_spending_window)
            .aggregate(&context.batch)
            .breaches(|stat| stat.sum > threshold)
            .into_iter()
            .map(|breach| {
                let detail = format!(
                    "user [{}] spent {} within {} ending at transaction [{}], threshold {}",
                    breach.key, breach.stat.sum, window, context.batch[breach.anchor].transaction_id, threshold
                );
                RuleTrigger::new(&context.batch[breach.index], self.name(), detail)
            })
            .collect()
    }
}
