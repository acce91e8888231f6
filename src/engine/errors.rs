use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Batch of {size} records exceeds the maximum of {limit}")]
    BatchTooLarge {
        size: usize,
        limit: usize
    },
    #[error("Rule evaluation task failed: {0}")]
    RuleTask(#[from] tokio::task::JoinError)
}
