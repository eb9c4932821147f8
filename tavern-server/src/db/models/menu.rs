//! Menu Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Menu entity (e.g. Breakfast, Lunch, Dinner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 200, message = "Menu name is required"))]
    pub name: String,
}

/// Update menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Menu name is required"))]
    pub name: Option<String>,
}

/// Menu with its items embedded (read model for GET /api/menus/{id}/full)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuFull {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub items: Vec<super::MenuItem>,
}
