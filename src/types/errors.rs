use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TimestampError {
    #[error("Timestamp error: Value is an empty string")]
    Empty,
    #[error("Timestamp error: Unrecognized format [{0}]")]
    InvalidFormat(String)
}
