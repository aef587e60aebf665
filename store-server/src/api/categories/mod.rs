//! Category API 模块

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// 公开读取路由
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", category_routes())
}

fn category_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

/// 管理员写入路由
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/api/admin/categories", admin_category_routes())
}

fn admin_category_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route_layer(axum_middleware::from_fn(require_admin))
}
