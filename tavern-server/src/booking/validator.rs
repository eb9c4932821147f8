//! Reservation time validation
//!
//! Rules are evaluated in order and the first violation wins, so callers can
//! surface a single precise rejection to the client.

use chrono::{NaiveDate, NaiveDateTime};
use shared::{AppError, ErrorCode};

use super::{blocking_window, closing_time, opening_time};
use crate::utils::AppResult;

/// Validate a candidate reservation's timestamp against the booking rules.
///
/// `today` is the restaurant's current wall-clock date; it is a parameter so
/// the rules stay deterministic under test.
///
/// 1. The reservation date must be strictly after `today`.
/// 2. The start must fall within business hours and the full service window
///    (2 h + 30 min buffer) must end by closing time. A window ending exactly
///    at closing is accepted.
pub fn validate_reservation_time(at: NaiveDateTime, today: NaiveDate) -> AppResult<()> {
    if at.date() <= today {
        return Err(AppError::new(ErrorCode::ReservationTooSoon));
    }

    let start = at.time();
    if start < opening_time() {
        return Err(AppError::new(ErrorCode::OutsideBusinessHours));
    }

    let window = blocking_window();
    let (end, wrapped) = start.overflowing_add_signed(window);
    if wrapped != 0 || end > closing_time() {
        return Err(AppError::new(ErrorCode::OutsideBusinessHours));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        date.and_hms_opt(h, min, 0).unwrap()
    }

    fn today() -> NaiveDate {
        day(2026, 8, 7)
    }

    #[test]
    fn test_rejects_same_day() {
        let err = validate_reservation_time(at(today(), 12, 0), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationTooSoon);
    }

    #[test]
    fn test_rejects_past_date() {
        let err = validate_reservation_time(at(day(2026, 8, 1), 12, 0), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationTooSoon);
    }

    #[test]
    fn test_accepts_next_day() {
        assert!(validate_reservation_time(at(day(2026, 8, 8), 12, 0), today()).is_ok());
    }

    #[test]
    fn test_rejects_before_opening() {
        let err = validate_reservation_time(at(day(2026, 8, 8), 9, 59), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutsideBusinessHours);
    }

    #[test]
    fn test_accepts_at_opening() {
        assert!(validate_reservation_time(at(day(2026, 8, 8), 10, 0), today()).is_ok());
    }

    #[test]
    fn test_window_must_end_by_closing() {
        // 19:00 + 2h30m = 21:30 — fits
        assert!(validate_reservation_time(at(day(2026, 8, 8), 19, 0), today()).is_ok());
        // 19:30 + 2h30m = 22:00 — ends exactly at closing, accepted
        assert!(validate_reservation_time(at(day(2026, 8, 8), 19, 30), today()).is_ok());
        // 20:00 + 2h30m = 22:30 — past closing
        let err = validate_reservation_time(at(day(2026, 8, 8), 20, 0), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutsideBusinessHours);
    }

    #[test]
    fn test_rejects_window_wrapping_midnight() {
        let err = validate_reservation_time(at(day(2026, 8, 8), 23, 0), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutsideBusinessHours);
    }
}
