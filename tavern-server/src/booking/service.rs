//! Reservation service - validation, conflict checks and persistence
//!
//! create/update run the same gate pipeline; every gate aborts the request
//! before anything is written:
//!
//! 1. DTO constraint validation
//! 2. reference resolution (table, optional user)
//! 3. holder invariant (user link or guest contact)
//! 4. time-rule validation
//! 5. table conflict window
//! 6. holder double-booking (user branch if linked, else guest email)

use chrono::Local;
use shared::{AppError, ErrorCode};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{ConflictChecker, validate_reservation_time};
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::db::repository::{
    DiningTableRepository, ReservationRepository, UserRepository,
};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_dto, validate_email_key, validate_phone_key, validate_required_text,
};

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    tables: DiningTableRepository,
    users: UserRepository,
    conflicts: ConflictChecker,
}

impl ReservationService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            tables: DiningTableRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            conflicts: ConflictChecker::new(db),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub async fn list(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.find_all().await?)
    }

    pub async fn list_including_deleted(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.find_all_including_deleted().await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id))
    }

    pub async fn list_by_table(&self, table_id: &str) -> AppResult<Vec<Reservation>> {
        let table = DiningTableRepository::record_id(table_id)?;
        Ok(self.reservations.find_by_table(&table).await?)
    }

    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Reservation>> {
        let user = UserRepository::record_id(user_id)?;
        Ok(self.reservations.find_by_user(&user).await?)
    }

    pub async fn list_by_guest_name(&self, guest_name: &str) -> AppResult<Vec<Reservation>> {
        validate_required_text(guest_name, "guest name", MAX_NAME_LEN)?;
        Ok(self.reservations.find_by_guest_name(guest_name).await?)
    }

    pub async fn list_by_guest_email(&self, guest_email: &str) -> AppResult<Vec<Reservation>> {
        validate_email_key(guest_email)?;
        Ok(self.reservations.find_by_guest_email(guest_email).await?)
    }

    pub async fn list_by_guest_phone(&self, guest_phone: &str) -> AppResult<Vec<Reservation>> {
        validate_phone_key(guest_phone)?;
        Ok(self.reservations.find_by_guest_phone(guest_phone).await?)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Create a reservation after running the full gate pipeline
    pub async fn create(&self, dto: ReservationCreate) -> AppResult<Reservation> {
        validate_dto(&dto)?;

        let (table, user) = self.resolve_refs(&dto).await?;
        self.check_holder_invariant(&user, &dto)?;

        validate_reservation_time(dto.reservation_time, Local::now().date_naive())?;

        self.conflicts
            .check_table(&table, dto.reservation_time, None)
            .await?;
        self.conflicts
            .check_holder(
                user.as_ref(),
                dto.guest_email.as_deref(),
                dto.reservation_time,
                None,
            )
            .await?;

        let created = self
            .reservations
            .create(Self::build_record(dto, table, user))
            .await?;

        let id = created.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
        tracing::info!(reservation = %id, "Reservation created");
        Ok(created)
    }

    /// Update a reservation, excluding itself from the conflict windows
    pub async fn update(&self, id: &str, dto: ReservationUpdate) -> AppResult<Reservation> {
        validate_dto(&dto)?;

        let own_id = ReservationRepository::record_id(id)?;
        let existing = self.get(id).await?;
        if existing.deleted {
            return Err(AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id));
        }

        let (table, user) = self.resolve_refs(&dto).await?;
        self.check_holder_invariant(&user, &dto)?;

        validate_reservation_time(dto.reservation_time, Local::now().date_naive())?;

        self.conflicts
            .check_table(&table, dto.reservation_time, Some(&own_id))
            .await?;
        self.conflicts
            .check_holder(
                user.as_ref(),
                dto.guest_email.as_deref(),
                dto.reservation_time,
                Some(&own_id),
            )
            .await?;

        let updated = self
            .reservations
            .update(id, Self::build_record(dto, table, user))
            .await?;

        tracing::info!(reservation = %id, "Reservation updated");
        Ok(updated)
    }

    /// Cancel a reservation (soft delete, record stays for audit)
    pub async fn cancel(&self, id: &str) -> AppResult<Reservation> {
        let existing = self.get(id).await?;
        if existing.deleted {
            return Err(AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id));
        }
        let cancelled = self.reservations.soft_delete(id).await?;
        tracing::info!(reservation = %id, "Reservation cancelled");
        Ok(cancelled)
    }

    /// Soft-delete and detach all reservations of a user (deletion cascade)
    pub async fn detach_for_user(&self, user: &RecordId) -> AppResult<u64> {
        let detached = self.reservations.soft_delete_for_user(user).await?;
        if detached > 0 {
            tracing::info!(user = %user, count = detached, "Detached reservations for deleted user");
        }
        Ok(detached)
    }

    // ── Pipeline pieces ─────────────────────────────────────────────

    /// Resolve the table and optional user references, rejecting dangling IDs
    async fn resolve_refs(
        &self,
        dto: &ReservationCreate,
    ) -> AppResult<(RecordId, Option<RecordId>)> {
        let table = self
            .tables
            .find_by_id(&dto.table_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| {
                AppError::new(ErrorCode::TableNotFound).with_detail("id", dto.table_id.clone())
            })?;
        let table_id = table
            .id
            .ok_or_else(|| AppError::internal("Stored table has no id"))?;

        let user_id = match &dto.user_id {
            Some(uid) => {
                self.users.find_by_id(uid).await?.ok_or_else(|| {
                    AppError::new(ErrorCode::UserNotFound).with_detail("id", uid.clone())
                })?;
                Some(UserRepository::record_id(uid)?)
            }
            None => None,
        };

        Ok((table_id, user_id))
    }

    /// A reservation must be held by somebody reachable: a user link, or
    /// guest contact details (email alongside the always-required name)
    fn check_holder_invariant(
        &self,
        user: &Option<RecordId>,
        dto: &ReservationCreate,
    ) -> AppResult<()> {
        if user.is_none() && dto.guest_email.is_none() {
            return Err(AppError::new(ErrorCode::GuestContactRequired));
        }
        Ok(())
    }

    fn build_record(dto: ReservationCreate, table: RecordId, user: Option<RecordId>) -> Reservation {
        Reservation {
            id: None,
            table,
            user,
            guest_name: dto.guest_name,
            guest_email: dto.guest_email,
            guest_phone: dto.guest_phone,
            number_of_guests: dto.number_of_guests,
            reservation_time: dto.reservation_time,
            deleted: false,
        }
    }
}
