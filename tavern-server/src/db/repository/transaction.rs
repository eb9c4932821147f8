//! Transaction Repository
//!
//! 表名使用 `payment` — TRANSACTION 是 SurrealQL 关键字 (BEGIN TRANSACTION)。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PaymentMethod, Transaction};
use crate::utils::time::now_millis;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "payment";

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all transactions
    pub async fn find_all(&self) -> RepoResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self
            .base
            .db()
            .query("SELECT * FROM payment ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(transactions)
    }

    /// Find transaction by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Transaction>> {
        let thing = BaseRepository::parse_id(id, TABLE)?;
        let transaction: Option<Transaction> = self.base.db().select(thing).await?;
        Ok(transaction)
    }

    /// Find all transactions against a bill
    pub async fn find_by_bill(&self, bill: &RecordId) -> RepoResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE bill = $bill ORDER BY created_at")
            .bind(("bill", bill.clone()))
            .await?
            .take(0)?;
        Ok(transactions)
    }

    /// Any transactions recorded against this bill? (bill delete guard)
    pub async fn exists_for_bill(&self, bill: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT id FROM payment WHERE bill = $bill LIMIT 1")
            .bind(("bill", bill.clone()))
            .await?;
        let hits: Vec<serde_json::Value> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// Record a payment event (funds check is the billing service's gate)
    pub async fn create(
        &self,
        bill: RecordId,
        amount: Decimal,
        payment_method: PaymentMethod,
    ) -> RepoResult<Transaction> {
        let transaction = Transaction {
            id: None,
            bill,
            amount,
            payment_method,
            created_at: now_millis(),
        };

        let created: Option<Transaction> =
            self.base.db().create(TABLE).content(transaction).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create transaction".to_string()))
    }
}
