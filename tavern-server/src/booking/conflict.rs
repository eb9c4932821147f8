//! Conflict queries against existing reservations
//!
//! A reservation on table T at time S blocks `[S − 2h30m, S + 2h30m]` for
//! that table (service window plus buffer on both sides). Holder conflicts
//! (user / guest email) are exact-time matches only.

use chrono::NaiveDateTime;
use shared::{AppError, ErrorCode};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::blocking_window;
use crate::db::repository::ReservationRepository;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ConflictChecker {
    reservations: ReservationRepository,
}

impl ConflictChecker {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db),
        }
    }

    /// The `[from, to]` span another reservation's start must not fall into
    pub fn conflict_window(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let window = blocking_window();
        (at - window, at + window)
    }

    /// Reject if the table already has an active reservation inside the window.
    ///
    /// `exclude` skips the reservation's own id during updates.
    pub async fn check_table(
        &self,
        table: &RecordId,
        at: NaiveDateTime,
        exclude: Option<&RecordId>,
    ) -> AppResult<()> {
        let (from, to) = Self::conflict_window(at);
        let conflicting = self
            .reservations
            .exists_table_conflict(table, from, to, exclude)
            .await?;
        if conflicting {
            return Err(AppError::new(ErrorCode::TableAlreadyReserved)
                .with_detail("table", table.to_string()));
        }
        Ok(())
    }

    /// Reject if the reservation's holder is double-booked at the exact time.
    ///
    /// Checks the user when one is attached, otherwise the guest email.
    pub async fn check_holder(
        &self,
        user: Option<&RecordId>,
        guest_email: Option<&str>,
        at: NaiveDateTime,
        exclude: Option<&RecordId>,
    ) -> AppResult<()> {
        if let Some(user) = user {
            if self.reservations.exists_user_at(user, at, exclude).await? {
                return Err(AppError::new(ErrorCode::UserDoubleBooked)
                    .with_detail("user", user.to_string()));
            }
        } else if let Some(email) = guest_email
            && self.reservations.exists_guest_at(email, at, exclude).await?
        {
            return Err(
                AppError::new(ErrorCode::GuestDoubleBooked).with_detail("guest_email", email)
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_conflict_window_bounds() {
        let at = NaiveDate::from_ymd_opt(2026, 8, 8)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let (from, to) = ConflictChecker::conflict_window(at);
        assert_eq!(from, at - chrono::Duration::minutes(150));
        assert_eq!(to, at + chrono::Duration::minutes(150));
    }
}
