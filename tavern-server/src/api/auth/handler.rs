//! Authentication Handlers
//!
//! Handles password login, current-user lookup and the OAuth2 login flow.

use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::AppResult;
use shared::ErrorCode;
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - 邮箱密码登录
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let users = UserRepository::new(state.get_db());
    let email = req.email.clone();

    let user = users.find_by_email(&email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let user = match user {
        Some(u) => {
            if !u.is_active {
                security_log!("WARN", "login_disabled_account", email = email.clone());
                return Err(AppError::new(ErrorCode::AccountDisabled));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!("WARN", "login_failed", email = email.clone());
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            security_log!("WARN", "login_unknown_email", email = email.clone());
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let permissions = user.role.permissions();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, user.role.as_str(), &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            email: user.email,
            role: user.role.as_str().to_string(),
            permissions,
            is_active: user.is_active,
        },
    }))
}

/// GET /api/auth/me - 当前用户信息 (来自令牌 claims)
pub async fn me(user: CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.id,
        email: user.email,
        role: user.role,
        permissions: user.permissions,
        is_active: true,
    })
}

// =============================================================================
// OAuth2 Login Flow
// =============================================================================

/// GET /api/auth/oauth/login - 302 到供应商授权页
pub async fn oauth_login(State(state): State<ServerState>) -> AppResult<Redirect> {
    let url = state.oauth_service.login_url()?;
    Ok(Redirect::temporary(url.as_str()))
}

/// OAuth2 回调查询参数
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// 供应商侧拒绝时带回的错误码
    pub error: Option<String>,
}

/// GET /api/auth/oauth/callback - 供应商回调
///
/// 成功路径交给 success handler (签发 JWT 并跳转前端)，
/// 任何失败都落到 failure handler (带错误码跳转)。
pub async fn oauth_callback(
    State(state): State<ServerState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Redirect {
    match run_callback(&state, query).await {
        Ok(redirect) => redirect,
        Err(err) => oauth_failure(&state, err),
    }
}

async fn run_callback(state: &ServerState, query: OAuthCallbackQuery) -> AppResult<Redirect> {
    if let Some(provider_error) = query.error {
        return Err(AppError::with_message(
            ErrorCode::OAuthExchangeFailed,
            format!("Provider rejected login: {}", provider_error),
        ));
    }

    let code = query
        .code
        .ok_or_else(|| AppError::validation("Missing authorization code"))?;
    let csrf_state = query
        .state
        .ok_or_else(|| AppError::new(ErrorCode::OAuthStateMismatch))?;

    let email = state.oauth_service.exchange(code, csrf_state).await?;
    oauth_success(state, &email).await
}

/// OAuth2 成功处理：建档 (或复用) 用户、签发 JWT、跳转前端
async fn oauth_success(state: &ServerState, email: &str) -> AppResult<Redirect> {
    let users = UserRepository::new(state.get_db());
    let user = users.upsert_oauth(email).await?;

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(
            &user_id,
            &user.email,
            user.role.as_str(),
            &user.role.permissions(),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, "OAuth2 login succeeded");

    // Token travels in the fragment so it never reaches access logs
    Ok(Redirect::temporary(&format!(
        "{}/login/success#token={}",
        state.config.app_url, token
    )))
}

/// OAuth2 失败处理：记录并带错误码跳转前端
fn oauth_failure(state: &ServerState, err: AppError) -> Redirect {
    security_log!(
        "WARN",
        "oauth_login_failed",
        code = err.code.code(),
        message = err.message.clone()
    );
    Redirect::temporary(&format!(
        "{}/login/failure?error={}",
        state.config.app_url,
        err.code.code()
    ))
}
