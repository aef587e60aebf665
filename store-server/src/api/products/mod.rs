//! Product API 模块

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
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/by-category/{category_id}", get(handler::list_by_category))
}

/// 管理员写入路由
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/api/admin/products", admin_product_routes())
}

fn admin_product_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route_layer(axum_middleware::from_fn(require_admin))
}
