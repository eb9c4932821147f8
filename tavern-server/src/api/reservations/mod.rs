//! Reservation API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/reservations | GET | 有效预订列表 |
//! | /api/reservations/all | GET | 全部预订 (含已取消，管理员) |
//! | /api/reservations/{id} | GET | 单个预订 |
//! | /api/reservations/by-table/{id} | GET | 按桌台 |
//! | /api/reservations/by-user/{id} | GET | 按用户 |
//! | /api/reservations/by-guest-name/{name} | GET | 按访客姓名 |
//! | /api/reservations/by-guest-email/{email} | GET | 按访客邮箱 |
//! | /api/reservations/by-guest-phone/{phone} | GET | 按访客电话 |
//! | /api/reservations | POST | 创建 |
//! | /api/reservations/{id} | PUT | 更新 |
//! | /api/reservations/{id} | DELETE | 取消 (软删除) |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{require_admin, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/by-table/{table_id}", get(handler::list_by_table))
        .route("/by-user/{user_id}", get(handler::list_by_user))
        .route("/by-guest-name/{name}", get(handler::list_by_guest_name))
        .route("/by-guest-email/{email}", get(handler::list_by_guest_email))
        .route("/by-guest-phone/{phone}", get(handler::list_by_guest_phone))
        .layer(middleware::from_fn(require_permission("reservations:read")));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::cancel),
        )
        .layer(middleware::from_fn(require_permission(
            "reservations:manage",
        )));

    let admin_routes = Router::new()
        .route("/all", get(handler::list_including_deleted))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes).merge(admin_routes)
}
