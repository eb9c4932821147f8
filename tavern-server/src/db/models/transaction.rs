//! Transaction Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// 支付方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
}

/// Transaction entity — a payment event against a bill
///
/// Transactions are immutable once written; corrections are new
/// transactions, never edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub bill: RecordId,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
}

/// Create transaction payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionCreate {
    #[validate(length(min = 1, message = "Bill ID is required"))]
    pub bill_id: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
}
