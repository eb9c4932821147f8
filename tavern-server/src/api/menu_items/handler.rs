//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::{MenuItemRepository, MenuRepository};
use crate::utils::AppResult;
use crate::utils::validation::validate_dto;
use shared::ErrorCode;

/// 菜品价格不允许为负
fn check_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            "Price must not be negative",
        ));
    }
    Ok(())
}

/// GET /api/menu-items - 获取所有菜品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.find_all().await?;
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_dto(&payload)?;
    check_price(payload.price)?;

    // Parent menu must exist
    let menu_repo = MenuRepository::new(state.get_db());
    menu_repo.find_by_id(&payload.menu_id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::MenuNotFound).with_detail("id", payload.menu_id.clone())
    })?;
    let menu_thing = MenuRepository::record_id(&payload.menu_id)?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload, menu_thing).await?;

    let id = item.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(menu_item = %id, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate_dto(&payload)?;
    if let Some(price) = payload.price {
        check_price(price)?;
    }

    let repo = MenuItemRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id.clone()))?;

    // Re-parenting needs the target menu to exist
    let menu_thing = match &payload.menu_id {
        Some(menu_id) => {
            MenuRepository::new(state.get_db())
                .find_by_id(menu_id)
                .await?
                .ok_or_else(|| {
                    AppError::new(ErrorCode::MenuNotFound).with_detail("id", menu_id.clone())
                })?;
            Some(MenuRepository::record_id(menu_id)?)
        }
        None => None,
    };

    let item = repo.update(&id, payload, menu_thing).await?;
    tracing::info!(menu_item = %id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id.clone()))?;

    repo.delete(&id).await?;
    tracing::info!(menu_item = %id, "Menu item deleted");
    Ok(Json(true))
}
