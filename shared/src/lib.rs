//! Shared types for the Tavern backend
//!
//! Common types used across the server and API clients: the unified error
//! system (codes, categories, HTTP mapping) and the auth wire DTOs.

pub mod client;
pub mod error;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
