mod errors;
mod rule_config;

pub use errors::ConfigError;
pub use rule_config::RuleConfig;
