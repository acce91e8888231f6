use chrono::TimeDelta;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: Threshold [{name}] must not be negative, got {value}")]
    NegativeThreshold {
        name: &'static str,
        value: Decimal
    },
    #[error("Configuration error: Window [{name}] must be positive, got {window}")]
    NonPositiveWindow {
        name: &'static str,
        window: TimeDelta
    },
    #[error("Configuration error: Window [{name}] of {seconds}s is out of range")]
    WindowOutOfRange {
        name: &'static str,
        seconds: i64
    },
    #[error("Configuration error: Credit fraction must be within (0, 1], got {0}")]
    FractionOutOfRange(Decimal),
    #[error("Configuration error: Count limit [{0}] must be at least 1")]
    ZeroCountLimit(&'static str),
    #[error("Configuration error: Maximum batch size must be at least 1")]
    ZeroBatchSize,
    #[error("Configuration error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(#[from] serde_json::Error)
}
