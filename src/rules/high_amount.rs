use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};

/// Flags any single transaction above the high amount threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighAmountRule;

impl Rule for HighAmountRule {
    fn name(&self) -> RuleName {
        RuleName::HighAmount
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        let threshold = context.config.high_amount_threshold;

        context.batch.iter()
            .filter(|transaction| transaction.amount > threshold)
            .map(|transaction| {
                RuleTrigger::new(transaction, self.name(), format!("amount {} exceeds {}", transaction.amount, threshold))
            })
            .collect()
    }
}
