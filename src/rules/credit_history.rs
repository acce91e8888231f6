use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};
use crate::window::{daily_buckets, GroupKey};

/// Flags a user's whole calendar day once that day's spending passes the allowed share of
/// their credit limit. Users without a stored limit are never flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditHistoryRule;

impl Rule for CreditHistoryRule {
    fn name(&self) -> RuleName {
        RuleName::CreditHistory
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        let fraction = context.config.credit_fraction_limit;
        let mut triggers = Vec::new();

        for bucket in daily_buckets(&context.batch, GroupKey::User) {
            let Some(credit_limit) = context.credit_limits.get(&bucket.key) else {
                continue;
            };

            let allowed = credit_limit * fraction;

            if bucket.total <= allowed {
                continue;
            }

            let detail = format!(
                "user [{}] spent {} on {}, above {} of credit limit {} ({})",
                bucket.key, bucket.total, bucket.day, fraction, credit_limit, allowed.normalize()
            );

            triggers.extend(bucket.members.iter().map(|&index| {
                RuleTrigger::new(&context.batch[index], self.name(), detail.clone())
            }));
        }

        triggers
    }
}
