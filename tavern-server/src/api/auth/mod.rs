//! Auth API 模块
//!
//! 登录、当前用户信息与 OAuth2 授权码流程。
//! `/login` 与 OAuth 两个入口是公共路由 (认证中间件放行)。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
        .route("/oauth/login", get(handler::oauth_login))
        .route("/oauth/callback", get(handler::oauth_callback))
}
