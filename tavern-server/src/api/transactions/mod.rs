//! Transaction API 模块
//!
//! 交易是追加式的支付流水：只有查询和创建，没有修改或删除。

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/transactions", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/by-bill/{bill_id}", get(handler::list_by_bill))
        .layer(middleware::from_fn(require_permission("transactions:read")));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_permission(
            "transactions:manage",
        )));

    read_routes.merge(manage_routes)
}
