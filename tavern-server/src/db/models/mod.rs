//! Database Models
//!
//! Record structs matching the SurrealDB tables plus their create/update
//! payloads. IDs serialize as `"table:id"` strings via [`serde_helpers`].

pub mod serde_helpers;

pub mod bill;
pub mod dining_table;
pub mod menu;
pub mod menu_item;
pub mod reservation;
pub mod transaction;
pub mod user;

pub use bill::{Bill, BillCreate, BillUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use menu::{Menu, MenuCreate, MenuFull, MenuUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use reservation::{Reservation, ReservationCreate, ReservationUpdate};
pub use transaction::{PaymentMethod, Transaction, TransactionCreate};
pub use user::{User, UserCreate, UserId, UserRole, UserUpdate};
