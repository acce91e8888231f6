mod errors;
mod fraud_engine;
mod merger;

pub use errors::EngineError;
pub use fraud_engine::{EvaluationOutcome, FraudEngine};
pub use merger::merge_triggers;
