mod errors;
mod report;
mod transaction;

pub use errors::{RecordError, RejectedRecord};
pub use report::{FraudReport, RuleName, RuleTrigger};
pub use transaction::{RawTransaction, Transaction};
