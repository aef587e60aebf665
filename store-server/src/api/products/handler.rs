//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{category, product};
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/by-category/:category_id - 按分类获取商品
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_category(&state.pool, category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;
    Ok(Json(product))
}

/// POST /api/admin/products - 创建商品 (管理员)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    // 分类必须存在且有效
    category::find_by_id(&state.pool, payload.category_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Category {} not found", payload.category_id)))?;

    let product = product::create(&state.pool, payload).await?;
    Ok(Json(product))
}

/// PUT /api/admin/products/:id - 更新商品 (管理员)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(category_id) = payload.category_id {
        category::find_by_id(&state.pool, category_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Category {} not found", category_id)))?;
    }

    let product = product::update(&state.pool, id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/admin/products/:id - 删除商品（软删除，管理员）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = product::delete(&state.pool, id).await?;
    Ok(Json(deleted))
}
