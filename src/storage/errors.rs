use crate::types::UserId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("Merchant name required")]
    EmptyMerchantName,
    #[error("User ID required")]
    EmptyUserId,
    #[error("Credit limit must be positive for user [{user_id}], got {credit_limit}")]
    NonPositiveCreditLimit {
        user_id: UserId,
        credit_limit: Decimal
    }
}
