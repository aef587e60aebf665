//! Order API 模块

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// 用户订单路由（认证后，owner 范围内）
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/mine", get(handler::list_mine))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", post(handler::cancel))
}

/// 管理员订单路由（全量列表、状态推进）
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", admin_order_routes())
}

fn admin_order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all))
        .route("/{id}/status", put(handler::advance_status))
        .route_layer(axum_middleware::from_fn(require_admin))
}
