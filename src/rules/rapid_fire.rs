use crate::models::{RuleName, RuleTrigger};
use crate::rules::{Rule, RuleContext};
use crate::types::describe_window;
use crate::window::{GroupKey, WindowAggregator};

/// Flags users firing off transactions in quick succession.
///
/// Unlike the other count rules this one is inclusive: reaching the limit is enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct RapidFireRule;

impl Rule for RapidFireRule {
    fn name(&self) -> RuleName {
        RuleName::RapidFire
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<RuleTrigger> {
        let config = &context.config;
        let limit = config.rapidfire_count_limit;
        let window = describe_window(config.rapidfire_window);

        WindowAggregator::new(GroupKey::User, config.rapidfire_window)
            .aggregate(&context.batch)
            .breaches(|stat| stat.count >= limit)
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
