//! Reservation API Handlers
//!
//! Thin HTTP layer over [`crate::booking::ReservationService`]; every business
//! gate (time rules, conflict windows, holder invariant) lives there.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::utils::AppResult;

/// GET /api/reservations - 有效预订列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list().await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/all - 全部预订，含已取消 (管理员审计视图)
pub async fn list_including_deleted(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_including_deleted().await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - 单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_service.get(&id).await?;
    Ok(Json(reservation))
}

/// GET /api/reservations/by-table/:table_id - 按桌台查询
pub async fn list_by_table(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_by_table(&table_id).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/by-user/:user_id - 按用户查询
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_by_user(&user_id).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/by-guest-name/:name - 按访客姓名查询
pub async fn list_by_guest_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_by_guest_name(&name).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/by-guest-email/:email - 按访客邮箱查询
pub async fn list_by_guest_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_by_guest_email(&email).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/by-guest-phone/:phone - 按访客电话查询
pub async fn list_by_guest_phone(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service.list_by_guest_phone(&phone).await?;
    Ok(Json(reservations))
}

/// POST /api/reservations - 创建预订
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_service.create(payload).await?;
    Ok(Json(reservation))
}

/// PUT /api/reservations/:id - 更新预订 (冲突检查排除自身)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_service.update(&id, payload).await?;
    Ok(Json(reservation))
}

/// DELETE /api/reservations/:id - 取消预订 (软删除)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_service.cancel(&id).await?;
    Ok(Json(reservation))
}
