//! Bill Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Bill, BillCreate, BillUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "bill";

#[derive(Clone)]
pub struct BillRepository {
    base: BaseRepository,
}

impl BillRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all bills
    pub async fn find_all(&self) -> RepoResult<Vec<Bill>> {
        let bills: Vec<Bill> = self
            .base
            .db()
            .query("SELECT * FROM bill ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(bills)
    }

    /// Find bill by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Bill>> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let bill: Option<Bill> = self.base.db().select(thing).await?;
        Ok(bill)
    }

    /// Find the bill attached to a reservation (one-to-one)
    pub async fn find_by_reservation(&self, reservation: &RecordId) -> RepoResult<Option<Bill>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM bill WHERE reservation = $reservation LIMIT 1")
            .bind(("reservation", reservation.clone()))
            .await?;
        let bills: Vec<Bill> = result.take(0)?;
        Ok(bills.into_iter().next())
    }

    /// Create a bill for a reservation; `final_amount` is computed here
    pub async fn create(&self, data: BillCreate, reservation: RecordId) -> RepoResult<Bill> {
        // One bill per reservation
        if self.find_by_reservation(&reservation).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Reservation already has a bill".to_string(),
            ));
        }

        let bill = Bill {
            id: None,
            final_amount: Bill::compute_final_amount(data.total_amount, data.tax, data.discount),
            total_amount: data.total_amount,
            tax: data.tax,
            discount: data.discount,
            reservation,
            created_at: now_millis(),
        };

        let created: Option<Bill> = self.base.db().create(TABLE).content(bill).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create bill".to_string()))
    }

    /// Update a bill's amounts; `final_amount` is recomputed
    pub async fn update(&self, id: &str, data: BillUpdate) -> RepoResult<Bill> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Bill {} not found", id)))?;

        let total_amount = data.total_amount.unwrap_or(existing.total_amount);
        let tax = data.tax.unwrap_or(existing.tax);
        let discount = data.discount.unwrap_or(existing.discount);
        let final_amount = Bill::compute_final_amount(total_amount, tax, discount);

        self.base
            .db()
            .query(
                "UPDATE $thing SET total_amount = $total_amount, tax = $tax, \
                 discount = $discount, final_amount = $final_amount",
            )
            .bind(("thing", thing))
            .bind(("total_amount", total_amount))
            .bind(("tax", tax))
            .bind(("discount", discount))
            .bind(("final_amount", final_amount))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Bill {} not found", id)))
    }

    /// Hard delete a bill (caller guards against recorded payments)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// RecordId helper for cross-repo queries
    pub fn record_id(id: &str) -> RepoResult<RecordId> {
        BaseRepository::parse_id(id, TABLE)
    }
}
