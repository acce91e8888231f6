use crate::models::errors::RecordError;
use crate::types::{parse_timestamp, Merchant, Timestamp, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single validated transaction within a batch.
///
/// Records reach the rules only through this type, so every field is present and the
/// amount is known to be non-negative once `validate` has passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Unique within the batch.
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    /// Compared against the merchant registry with an exact, case-sensitive match.
    #[serde(rename = "merchant_name")]
    pub merchant: Merchant,
    pub amount: Decimal,
    pub timestamp: Timestamp
}

impl Transaction {
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.transaction_id.trim().is_empty() {
            return Err(RecordError::missing_field("transaction_id", None));
        }

        let transaction_id = Some(self.transaction_id.as_str());

        if self.user_id.trim().is_empty() {
            return Err(RecordError::missing_field("user_id", transaction_id));
        }

        if self.merchant.trim().is_empty() {
            return Err(RecordError::missing_field("merchant_name", transaction_id));
        }

        if self.amount < Decimal::ZERO {
            return Err(RecordError::negative_amount(&self.transaction_id, self.amount));
        }

        Ok(())
    }
}

/// Represents a single row from the input CSV file.
///
/// Every column is optional here so that a missing value surfaces as a `RecordError`
/// naming the field, rather than as an opaque deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(alias = "id")]
    pub transaction_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(alias = "merchant")]
    pub merchant_name: Option<String>,
    pub amount: Option<String>,
    pub timestamp: Option<String>
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = RecordError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let transaction_id = required(raw.transaction_id, "transaction_id", None)?;
        let user_id = required(raw.user_id, "user_id", Some(&transaction_id))?;
        let merchant = required(raw.merchant_name, "merchant_name", Some(&transaction_id))?;
        let amount = required(raw.amount, "amount", Some(&transaction_id))?;
        let timestamp = required(raw.timestamp, "timestamp", Some(&transaction_id))?;

        let amount = Decimal::from_str(&amount)
            .or_else(|_| Decimal::from_scientific(&amount))
            .map_err(|_| RecordError::invalid_amount(&transaction_id, &amount))?;

        let timestamp = parse_timestamp(&timestamp)
            .map_err(|error| RecordError::invalid_timestamp(&transaction_id, error))?;

        let transaction = Transaction { transaction_id, user_id, merchant, amount, timestamp };
        transaction.validate()?;

        Ok(transaction)
    }
}

fn required(value: Option<String>, field: &'static str, transaction_id: Option<&str>) -> Result<String, RecordError> {
    //NOTE: Identifiers are trimmed, merchant names keep their inner spacing ("Apple Store").
    value.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RecordError::missing_field(field, transaction_id))
}
