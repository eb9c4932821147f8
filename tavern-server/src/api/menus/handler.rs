//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{Menu, MenuCreate, MenuFull, MenuItem, MenuUpdate};
use crate::db::repository::{MenuItemRepository, MenuRepository, RepoError};
use crate::utils::AppResult;
use crate::utils::validation::validate_dto;
use shared::ErrorCode;

/// GET /api/menus - 获取所有菜单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Menu>>> {
    let repo = MenuRepository::new(state.get_db());
    let menus = repo.find_all().await?;
    Ok(Json(menus))
}

/// GET /api/menus/:id - 获取单个菜单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Menu>> {
    let repo = MenuRepository::new(state.get_db());
    let menu = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound).with_detail("id", id))?;
    Ok(Json(menu))
}

/// GET /api/menus/:id/full - 菜单及其所有菜品
pub async fn get_full(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuFull>> {
    let menu_repo = MenuRepository::new(state.get_db());
    let item_repo = MenuItemRepository::new(state.get_db());

    let menu = menu_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound).with_detail("id", id.clone()))?;

    let menu_thing = MenuRepository::record_id(&id)?;
    let items = item_repo.find_by_menu(&menu_thing).await?;

    Ok(Json(MenuFull {
        id: menu.id,
        name: menu.name,
        items,
    }))
}

/// GET /api/menus/:id/items - 菜单下的菜品列表
pub async fn list_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let menu_repo = MenuRepository::new(state.get_db());
    menu_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound).with_detail("id", id.clone()))?;

    let menu_thing = MenuRepository::record_id(&id)?;
    let items = MenuItemRepository::new(state.get_db())
        .find_by_menu(&menu_thing)
        .await?;
    Ok(Json(items))
}

/// POST /api/menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    validate_dto(&payload)?;

    let repo = MenuRepository::new(state.get_db());
    let menu = repo.create(payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::MenuNameExists, msg),
        other => other.into(),
    })?;

    let id = menu.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(menu = %id, "Menu created");
    Ok(Json(menu))
}

/// PUT /api/menus/:id - 更新菜单
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    validate_dto(&payload)?;

    let repo = MenuRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound).with_detail("id", id.clone()))?;

    let menu = repo.update(&id, payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::MenuNameExists, msg),
        other => other.into(),
    })?;

    tracing::info!(menu = %id, "Menu updated");
    Ok(Json(menu))
}

/// DELETE /api/menus/:id - 删除菜单 (连同其菜品)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound).with_detail("id", id.clone()))?;

    repo.delete(&id).await?;
    tracing::info!(menu = %id, "Menu deleted with its items");
    Ok(Json(true))
}
