//! Bill Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Bill entity — one per reservation
///
/// `final_amount` is always derived server-side; whatever the client sends
/// is ignored and recomputed before persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub total_amount: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
    /// The reservation this bill settles
    #[serde(with = "serde_helpers::record_id")]
    pub reservation: RecordId,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
}

impl Bill {
    /// final = total + tax - discount
    pub fn compute_final_amount(total: Decimal, tax: Decimal, discount: Decimal) -> Decimal {
        total + tax - discount
    }
}

/// Create bill payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BillCreate {
    #[validate(length(min = 1, message = "Reservation ID is required"))]
    pub reservation_id: String,
    pub total_amount: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
}

/// Update bill payload (amounts only — the reservation link is immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_final_amount() {
        assert_eq!(
            Bill::compute_final_amount(dec!(100.00), dec!(21.00), dec!(10.00)),
            dec!(111.00)
        );
        // Discount larger than total+tax yields a negative balance;
        // the billing service rejects that before it gets here.
        assert_eq!(
            Bill::compute_final_amount(dec!(5.00), dec!(0.00), dec!(10.00)),
            dec!(-5.00)
        );
    }
}
