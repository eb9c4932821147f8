//! Reservation Repository
//!
//! Soft-delete semantics: cancelled reservations keep their record with
//! `deleted = true` and are excluded from every active query and conflict
//! window. `reservation_time` is stored as an ISO-8601 wall-clock string, so
//! lexicographic range comparison is also chronological.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Reservation;
use chrono::NaiveDateTime;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active reservations
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE deleted = false ORDER BY reservation_time")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find every reservation, cancelled ones included (admin/audit view)
    pub async fn find_all_including_deleted(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY reservation_time")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find reservation by id (soft-deleted records are still addressable)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Active reservations for one table
    pub async fn find_by_table(&self, table: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE dining_table = $table AND deleted = false \
                 ORDER BY reservation_time",
            )
            .bind(("table", table.clone()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Active reservations held by one user
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE user = $user AND deleted = false \
                 ORDER BY reservation_time",
            )
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Active reservations matching a guest name
    pub async fn find_by_guest_name(&self, guest_name: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE guest_name = $guest_name AND deleted = false \
                 ORDER BY reservation_time",
            )
            .bind(("guest_name", guest_name.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Active reservations matching a guest email
    pub async fn find_by_guest_email(&self, guest_email: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE guest_email = $guest_email AND deleted = false \
                 ORDER BY reservation_time",
            )
            .bind(("guest_email", guest_email.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Active reservations matching a guest phone
    pub async fn find_by_guest_phone(&self, guest_phone: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE guest_phone = $guest_phone AND deleted = false \
                 ORDER BY reservation_time",
            )
            .bind(("guest_phone", guest_phone.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Persist a new reservation
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Replace the mutable fields of an existing reservation
    pub async fn update(&self, id: &str, reservation: Reservation) -> RepoResult<Reservation> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET dining_table = $table, user = $user, \
                 guest_name = $guest_name, guest_email = $guest_email, \
                 guest_phone = $guest_phone, number_of_guests = $number_of_guests, \
                 reservation_time = $reservation_time",
            )
            .bind(("thing", thing))
            .bind(("table", reservation.table))
            .bind(("user", reservation.user))
            .bind(("guest_name", reservation.guest_name))
            .bind(("guest_email", reservation.guest_email))
            .bind(("guest_phone", reservation.guest_phone))
            .bind(("number_of_guests", reservation.number_of_guests))
            .bind(("reservation_time", reservation.reservation_time))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Soft delete a reservation (record is kept for audit)
    pub async fn soft_delete(&self, id: &str) -> RepoResult<Reservation> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        self.base
            .db()
            .query("UPDATE $thing SET deleted = true")
            .bind(("thing", thing))
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Soft-delete and detach every reservation held by a user
    ///
    /// Used by the user-deletion cascade: the reservations survive for audit
    /// with the user link cleared.
    pub async fn soft_delete_for_user(&self, user: &RecordId) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE reservation SET deleted = true, user = NONE \
                 WHERE user = $user RETURN AFTER",
            )
            .bind(("user", user.clone()))
            .await?;
        let updated: Vec<Reservation> = result.take(0)?;
        Ok(updated.len() as u64)
    }

    // ── Conflict queries ────────────────────────────────────────────

    /// Any active reservation for `table` starting inside `[from, to]`?
    pub async fn exists_table_conflict(
        &self,
        table: &RecordId,
        from: NaiveDateTime,
        to: NaiveDateTime,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let mut result = if let Some(exclude) = exclude {
            self.base
                .db()
                .query(
                    "SELECT id FROM reservation WHERE dining_table = $table \
                     AND deleted = false \
                     AND reservation_time >= $from AND reservation_time <= $to \
                     AND id != $exclude LIMIT 1",
                )
                .bind(("table", table.clone()))
                .bind(("from", from))
                .bind(("to", to))
                .bind(("exclude", exclude.clone()))
                .await?
        } else {
            self.base
                .db()
                .query(
                    "SELECT id FROM reservation WHERE dining_table = $table \
                     AND deleted = false \
                     AND reservation_time >= $from AND reservation_time <= $to LIMIT 1",
                )
                .bind(("table", table.clone()))
                .bind(("from", from))
                .bind(("to", to))
                .await?
        };
        let hits: Vec<serde_json::Value> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// Does `user` already hold an active reservation at exactly `at`?
    pub async fn exists_user_at(
        &self,
        user: &RecordId,
        at: NaiveDateTime,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let mut result = if let Some(exclude) = exclude {
            self.base
                .db()
                .query(
                    "SELECT id FROM reservation WHERE user = $user AND deleted = false \
                     AND reservation_time = $at AND id != $exclude LIMIT 1",
                )
                .bind(("user", user.clone()))
                .bind(("at", at))
                .bind(("exclude", exclude.clone()))
                .await?
        } else {
            self.base
                .db()
                .query(
                    "SELECT id FROM reservation WHERE user = $user AND deleted = false \
                     AND reservation_time = $at LIMIT 1",
                )
                .bind(("user", user.clone()))
                .bind(("at", at))
                .await?
        };
        let hits: Vec<serde_json::Value> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// Does `guest_email` already hold an active reservation at exactly `at`?
    pub async fn exists_guest_at(
        &self,
        guest_email: &str,
        at: NaiveDateTime,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let mut result = if let Some(exclude) = exclude {
            self.base
                .db()
                .query(
                    "SELECT id FROM reservation WHERE guest_email = $guest_email \
                     AND deleted = false AND reservation_time = $at \
                     AND id != $exclude LIMIT 1",
                )
                .bind(("guest_email", guest_email.to_string()))
                .bind(("at", at))
                .bind(("exclude", exclude.clone()))
                .await?
        } else {
            self.base
                .db()
                .query(
                    "SELECT id FROM reservation WHERE guest_email = $guest_email \
                     AND deleted = false AND reservation_time = $at LIMIT 1",
                )
                .bind(("guest_email", guest_email.to_string()))
                .bind(("at", at))
                .await?
        };
        let hits: Vec<serde_json::Value> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// Any active reservation referencing this table at all? (delete guard)
    pub async fn has_active_for_table(&self, table: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT id FROM reservation WHERE dining_table = $table \
                 AND deleted = false LIMIT 1",
            )
            .bind(("table", table.clone()))
            .await?;
        let hits: Vec<serde_json::Value> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// RecordId helper for cross-repo queries
    pub fn record_id(id: &str) -> RepoResult<RecordId> {
        BaseRepository::parse_id(id, TABLE)
    }
}
