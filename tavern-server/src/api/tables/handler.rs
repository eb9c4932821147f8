//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::{DiningTableRepository, RepoError, ReservationRepository};
use crate::utils::AppResult;
use crate::utils::validation::validate_dto;
use shared::ErrorCode;

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.get_db());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.get_db());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("id", id))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_dto(&payload)?;

    let repo = DiningTableRepository::new(state.get_db());
    let table = repo.create(payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TableNameExists, msg),
        other => other.into(),
    })?;

    let id = table.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(table = %id, "Dining table created");
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_dto(&payload)?;

    let repo = DiningTableRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("id", id.clone()))?;

    let table = repo.update(&id, payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TableNameExists, msg),
        other => other.into(),
    })?;

    tracing::info!(table = %id, "Dining table updated");
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除桌台
///
/// 仍有未取消预订的桌台拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("id", id.clone()))?;

    let table_thing = DiningTableRepository::record_id(&id)?;
    let reservations = ReservationRepository::new(state.get_db());
    if reservations.has_active_for_table(&table_thing).await? {
        return Err(AppError::new(ErrorCode::TableHasReservations).with_detail("id", id));
    }

    repo.delete(&id).await?;
    tracing::info!(table = %id, "Dining table deleted");
    Ok(Json(true))
}
