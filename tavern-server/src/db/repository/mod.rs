//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

// Identity
pub mod user;

// Floor plan
pub mod dining_table;

// Catalog
pub mod menu;
pub mod menu_item;

// Booking
pub mod reservation;

// Billing
pub mod bill;
pub mod transaction;

// Re-exports
pub use bill::BillRepository;
pub use dining_table::DiningTableRepository;
pub use menu::MenuRepository;
pub use menu_item::MenuItemRepository;
pub use reservation::ReservationRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        use shared::{AppError, ErrorCode};
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "menu:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("menu", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Parse an API ID string into a RecordId, checking the table prefix
    pub fn parse_id(id: &str, table: &str) -> RepoResult<surrealdb::RecordId> {
        let thing: surrealdb::RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if thing.table() != table {
            return Err(RepoError::Validation(format!(
                "Invalid {} ID: {}",
                table, id
            )));
        }
        Ok(thing)
    }
}
