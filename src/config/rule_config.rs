use crate::config::errors::ConfigError;
use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Thresholds and window lengths shared by every rule in the catalogue.
///
/// The engine takes this by value at construction and never mutates it, so every batch
/// evaluated by one engine sees the same rule parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    /// HighAmount fires when a single amount is strictly above this.
    pub high_amount_threshold: Decimal,
    /// TotalSpending fires when a user's trailing sum is strictly above this.
    pub total_spending_threshold: Decimal,
    pub total_spending_window: TimeDelta,
    /// HighTransactionCount fires when a user's trailing count is strictly above this.
    pub high_count_limit: usize,
    pub high_count_window: TimeDelta,
    /// WhitelistMerchant fires when a merchant's trailing count is strictly above this.
    pub whitelist_count_limit: usize,
    pub whitelist_window: TimeDelta,
    /// Share of the stored credit limit a user may spend in one calendar day.
    pub credit_fraction_limit: Decimal,
    /// RapidFire fires when a user's trailing count reaches this.
    pub rapidfire_count_limit: usize,
    pub rapidfire_window: TimeDelta,
    /// Largest number of input records accepted in one batch.
    pub max_batch_size: usize
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            high_amount_threshold: Decimal::from(10_000),
            total_spending_threshold: Decimal::from(50_000),
            total_spending_window: TimeDelta::hours(24),
            high_count_limit: 10,
            high_count_window: TimeDelta::hours(1),
            whitelist_count_limit: 5,
            whitelist_window: TimeDelta::minutes(15),
            credit_fraction_limit: Decimal::new(30, 2),
            rapidfire_count_limit: 5,
            rapidfire_window: TimeDelta::minutes(1),
            max_batch_size: 1000
        }
    }
}

impl RuleConfig {
    pub fn with_high_amount_threshold(mut self, threshold: Decimal) -> Self {
        self.high_amount_threshold = threshold;
        self
    }

    pub fn with_total_spending(mut self, threshold: Decimal, window: TimeDelta) -> Self {
        self.total_spending_threshold = threshold;
        self.total_spending_window = window;
        self
    }

    pub fn with_high_count(mut self, limit: usize, window: TimeDelta) -> Self {
        self.high_count_limit = limit;
        self.high_count_window = window;
        self
    }

    pub fn with_whitelist_count(mut self, limit: usize, window: TimeDelta) -> Self {
        self.whitelist_count_limit = limit;
        self.whitelist_window = window;
        self
    }

    pub fn with_credit_fraction_limit(mut self, fraction: Decimal) -> Self {
        self.credit_fraction_limit = fraction;
        self
    }

    pub fn with_rapidfire(mut self, limit: usize, window: TimeDelta) -> Self {
        self.rapidfire_count_limit = limit;
        self.rapidfire_window = window;
        self
    }

    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    /// Loads a JSON object of overrides on top of the defaults and validates the result.
    ///
    /// Window lengths are given in whole seconds (`total_spending_window_secs`, ...).
    /// Unknown keys are rejected so that a misspelled option never silently falls back
    /// to its default.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let overrides: RuleConfigOverrides = serde_json::from_str(content)?;
        let config = overrides.apply(Self::default())?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every option; called by the engine before any batch is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("high_amount_threshold", self.high_amount_threshold)?;
        check_threshold("total_spending_threshold", self.total_spending_threshold)?;

        check_window("total_spending_window", self.total_spending_window)?;
        check_window("high_count_window", self.high_count_window)?;
        check_window("whitelist_window", self.whitelist_window)?;
        check_window("rapidfire_window", self.rapidfire_window)?;

        if self.credit_fraction_limit <= Decimal::ZERO || self.credit_fraction_limit > Decimal::ONE {
            return Err(ConfigError::FractionOutOfRange(self.credit_fraction_limit));
        }

        //NOTE: The strict `>` count rules stay meaningful at zero, RapidFire's `>=` does not.
        if self.rapidfire_count_limit == 0 {
            return Err(ConfigError::ZeroCountLimit("rapidfire_count_limit"));
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        Ok(())
    }
}

fn check_threshold(name: &'static str, value: Decimal) -> Result<(), ConfigError> {
    if value < Decimal::ZERO {
        return Err(ConfigError::NegativeThreshold { name, value });
    }

    Ok(())
}

fn check_window(name: &'static str, window: TimeDelta) -> Result<(), ConfigError> {
    if window <= TimeDelta::zero() {
        return Err(ConfigError::NonPositiveWindow { name, window });
    }

    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleConfigOverrides {
    high_amount_threshold: Option<Decimal>,
    total_spending_threshold: Option<Decimal>,
    total_spending_window_secs: Option<i64>,
    high_count_limit: Option<usize>,
    high_count_window_secs: Option<i64>,
    whitelist_count_limit: Option<usize>,
    whitelist_window_secs: Option<i64>,
    credit_fraction_limit: Option<Decimal>,
    rapidfire_count_limit: Option<usize>,
    rapidfire_window_secs: Option<i64>,
    max_batch_size: Option<usize>
}

impl RuleConfigOverrides {
    fn apply(self, mut config: RuleConfig) -> Result<RuleConfig, ConfigError> {
        if let Some(value) = self.high_amount_threshold {
            config.high_amount_threshold = value;
        }
        if let Some(value) = self.total_spending_threshold {
            config.total_spending_threshold = value;
        }
        if let Some(seconds) = self.total_spending_window_secs {
            config.total_spending_window = window_from_secs("total_spending_window", seconds)?;
        }
        if let Some(value) = self.high_count_limit {
            config.high_count_limit = value;
        }
        if let Some(seconds) = self.high_count_window_secs {
            config.high_count_window = window_from_secs("high_count_window", seconds)?;
        }
        if let Some(value) = self.whitelist_count_limit {
            config.whitelist_count_limit = value;
        }
        if let Some(seconds) = self.whitelist_window_secs {
            config.whitelist_window = window_from_secs("whitelist_window", seconds)?;
        }
        if let Some(value) = self.credit_fraction_limit {
            config.credit_fraction_limit = value;
        }
        if let Some(value) = self.rapidfire_count_limit {
            config.rapidfire_count_limit = value;
        }
        if let Some(seconds) = self.rapidfire_window_secs {
            config.rapidfire_window = window_from_secs("rapidfire_window", seconds)?;
        }
        if let Some(value) = self.max_batch_size {
            config.max_batch_size = value;
        }

        Ok(config)
    }
}

fn window_from_secs(name: &'static str, seconds: i64) -> Result<TimeDelta, ConfigError> {
    TimeDelta::try_seconds(seconds).ok_or(ConfigError::WindowOutOfRange { name, seconds })
}
