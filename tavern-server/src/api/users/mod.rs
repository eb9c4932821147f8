//! User API 模块
//!
//! `POST /api/users` 是公共路由 (自助注册，认证中间件放行)；
//! 其余操作需要认证与相应权限。

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::{require_admin, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    // Self-registration is open; everything else is guarded
    let public_routes = Router::new().route("/", post(handler::create));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/by-email/{email}", get(handler::get_by_email))
        .layer(middleware::from_fn(require_permission("users:read")));

    let manage_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .route("/{id}/disable", post(handler::disable))
        .layer(middleware::from_fn(require_permission("users:manage")));

    let admin_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    public_routes
        .merge(read_routes)
        .merge(manage_routes)
        .merge(admin_routes)
}
