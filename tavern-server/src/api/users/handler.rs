//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserRole, UserUpdate};
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::AppResult;
use crate::utils::validation::{validate_dto, validate_email_key};
use shared::ErrorCode;

/// GET /api/users - 获取所有用户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    Ok(Json(users))
}

/// GET /api/users/:id - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", id))?;
    Ok(Json(user))
}

/// GET /api/users/by-email/:email - 按邮箱查找用户
pub async fn get_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    validate_email_key(&email)?;
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("email", email))?;
    Ok(Json(user))
}

/// POST /api/users - 创建用户 (公共注册入口)
///
/// 第一个注册的账户成为管理员 (引导流程)，之后的注册一律是 customer —
/// 请求里的 role 字段不被信任。
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    validate_dto(&payload)?;

    let repo = UserRepository::new(state.get_db());
    payload.role = if repo.find_all().await?.is_empty() {
        tracing::info!(email = %payload.email, "Bootstrapping first user as admin");
        Some(UserRole::Admin)
    } else {
        Some(UserRole::Customer)
    };

    let user = repo.create(payload).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailExists),
        other => other.into(),
    })?;

    let id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(user = %id, "User created");
    Ok(Json(user))
}

/// PUT /api/users/:id - 更新用户 (邮箱 / 密码)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    validate_dto(&payload)?;

    let repo = UserRepository::new(state.get_db());
    // Distinguish the 404 from the 409 before delegating
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", id.clone()))?;

    let user = repo.update(&id, payload).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailExists),
        other => other.into(),
    })?;

    tracing::info!(user = %id, "User updated");
    Ok(Json(user))
}

/// POST /api/users/:id/disable - 停用用户 (保留记录，拒绝登录)
pub async fn disable(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", id.clone()))?;

    if !existing.is_active {
        return Err(AppError::new(ErrorCode::UserAlreadyDisabled));
    }

    let user = repo.disable(&id).await?;
    tracing::info!(user = %id, "User disabled");
    Ok(Json(user))
}

/// DELETE /api/users/:id - 删除用户
///
/// 先级联软删并解绑该用户的全部预订 (记录留作审计)，再删除用户本身。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", id.clone()))?;

    let user_thing = UserRepository::record_id(&id)?;
    let detached = state
        .reservation_service
        .detach_for_user(&user_thing)
        .await?;

    repo.delete(&id).await?;
    tracing::info!(user = %id, detached_reservations = detached, "User deleted");
    Ok(Json(true))
}
