use crate::models::Transaction;
use crate::types::TransactionId;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/// The fixed rule catalogue.
///
/// Declaration order is the catalogue order: reports list triggered rules sorted by it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum RuleName {
    HighAmount,
    TotalSpending,
    FraudulentMerchant,
    HighTransactionCount,
    WhitelistMerchant,
    CreditHistory,
    RapidFire
}

impl RuleName {
    pub const CATALOGUE: [RuleName; 7] = [
        RuleName::HighAmount,
        RuleName::TotalSpending,
        RuleName::FraudulentMerchant,
        RuleName::HighTransactionCount,
        RuleName::WhitelistMerchant,
        RuleName::CreditHistory,
        RuleName::RapidFire
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::HighAmount => "HighAmount",
            RuleName::TotalSpending => "TotalSpending",
            RuleName::FraudulentMerchant => "FraudulentMerchant",
            RuleName::HighTransactionCount => "HighTransactionCount",
            RuleName::WhitelistMerchant => "WhitelistMerchant",
            RuleName::CreditHistory => "CreditHistory",
            RuleName::RapidFire => "RapidFire"
        }
    }
}

impl Display for RuleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One rule firing for one transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RuleTrigger {
    pub transaction_id: TransactionId,
    pub rule: RuleName,
    /// Human readable reason, e.g. the computed sum and the threshold it crossed.
    pub detail: String
}

impl RuleTrigger {
    pub fn new(transaction: &Transaction, rule: RuleName, detail: String) -> Self {
        Self {
            transaction_id: transaction.transaction_id.clone(),
            rule,
            detail
        }
    }
}

/// A flagged transaction with the distinct rules that fired for it, in catalogue order.
///
/// `reasons[i]` explains `triggered_rules[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudReport {
    pub transaction: Transaction,
    pub triggered_rules: Vec<RuleName>,
    pub reasons: Vec<String>
}
