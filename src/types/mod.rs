mod errors;
mod timestamp;
#[cfg(test)]
mod tests;

pub use errors::TimestampError;
pub use timestamp::{describe_window, parse_timestamp};

use chrono::{DateTime, FixedOffset};

pub type TransactionId = String;
pub type UserId = String;
pub type Merchant = String;
pub type Timestamp = DateTime<FixedOffset>;
