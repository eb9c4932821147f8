//! Reservation Model

use super::serde_helpers;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use crate::utils::validation::PHONE_REGEX;

/// Reservation entity
///
/// Invariant: either `user` is linked or the guest contact fields
/// (`guest_name` + `guest_email`) are filled — enforced by the booking
/// service before anything is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Reserved table (stored as `dining_table` — `table` is a SurrealQL keyword)
    #[serde(rename = "dining_table", with = "serde_helpers::record_id")]
    pub table: RecordId,
    /// Registered user holding the reservation (absent for walk-in guests)
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub user: Option<RecordId>,
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
    pub number_of_guests: i32,
    /// Wall-clock start of the 2h service window (ISO-8601 in storage,
    /// lexicographically ordered so BETWEEN works on it)
    pub reservation_time: NaiveDateTime,
    /// Soft-delete flag — cancelled/detached reservations stay for audit
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub deleted: bool,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    #[validate(length(min = 1, message = "Table ID is required"))]
    pub table_id: String,
    pub reservation_time: NaiveDateTime,
    #[validate(range(min = 1, message = "There must be at least one guest"))]
    pub number_of_guests: i32,
    /// Optional registered user; guests book with contact details only
    pub user_id: Option<String>,
    #[validate(length(min = 2, max = 200, message = "Guest name must be at least 2 characters"))]
    pub guest_name: String,
    #[validate(email(message = "Invalid guest email format"))]
    pub guest_email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid guest phone number format"))]
    pub guest_phone: Option<String>,
}

/// Update reservation payload — full replace, same shape as create
pub type ReservationUpdate = ReservationCreate;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use validator::Validate;

    fn base_create() -> ReservationCreate {
        ReservationCreate {
            table_id: "dining_table:t1".into(),
            reservation_time: NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            number_of_guests: 2,
            user_id: None,
            guest_name: "Ada Lovelace".into(),
            guest_email: Some("ada@example.com".into()),
            guest_phone: Some("+34600123456".into()),
        }
    }

    #[test]
    fn test_create_payload_valid() {
        assert!(base_create().validate().is_ok());
    }

    #[test]
    fn test_guest_count_minimum() {
        let mut dto = base_create();
        dto.number_of_guests = 0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_guest_phone_pattern() {
        let mut dto = base_create();
        dto.guest_phone = Some("call me".into());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_guest_name_length() {
        let mut dto = base_create();
        dto.guest_name = "A".into();
        assert!(dto.validate().is_err());
    }
}
