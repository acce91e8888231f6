use crate::types::{TimestampError, TransactionId};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a record was kept out of evaluation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    #[error("Missing required field [{field}] for transaction [{}]", .transaction_id.as_deref().unwrap_or("unknown"))]
    MissingField {
        field: &'static str,
        transaction_id: Option<TransactionId>
    },
    #[error("Amount must not be negative for transaction [{transaction_id}], got {amount}")]
    NegativeAmount {
        transaction_id: TransactionId,
        amount: Decimal
    },
    #[error("Amount [{value}] is not a decimal for transaction [{transaction_id}]")]
    InvalidAmount {
        transaction_id: TransactionId,
        value: String
    },
    #[error("Invalid timestamp for transaction [{transaction_id}]: {source}")]
    InvalidTimestamp {
        transaction_id: TransactionId,
        source: TimestampError
    },
    #[error("Duplicate transaction [{transaction_id}] within batch")]
    DuplicateTransaction {
        transaction_id: TransactionId
    },
    #[error("Unreadable record: {0}")]
    Unreadable(String)
}

impl RecordError {
    pub fn missing_field(field: &'static str, transaction_id: Option<&str>) -> Self {
        Self::MissingField { field, transaction_id: transaction_id.map(str::to_string) }
    }

    pub fn negative_amount(transaction_id: &str, amount: Decimal) -> Self {
        Self::NegativeAmount { transaction_id: transaction_id.to_string(), amount }
    }

    pub fn invalid_amount(transaction_id: &str, value: &str) -> Self {
        Self::InvalidAmount { transaction_id: transaction_id.to_string(), value: value.to_string() }
    }

    pub fn invalid_timestamp(transaction_id: &str, source: TimestampError) -> Self {
        Self::InvalidTimestamp { transaction_id: transaction_id.to_string(), source }
    }

    pub fn duplicate_transaction(transaction_id: &str) -> Self {
        Self::DuplicateTransaction { transaction_id: transaction_id.to_string() }
    }
}

//NOTE: Rejections are reported by their message, the variant fields are already part of it.
impl Serialize for RecordError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A record rejected before aggregation, together with its zero-based position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    pub position: usize,
    pub error: RecordError
}
