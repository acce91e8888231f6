use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};

/// Flags transactions at merchants on the fraud list, whatever the amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct FraudulentMerchantRule;

impl Rule for FraudulentMerchantRule {
    fn name(&self) -> RuleName {
        RuleName::FraudulentMerchant
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        context.batch.iter()
            .filter(|transaction| context.merchants.is_fraudulent(&transaction.merchant))
            .map(|transaction| {
                RuleTrigger::new(transaction, self.name(), format!("merchant [{}] is on the fraud list", transaction.merchant))
            })
            .collect()
    }
}
