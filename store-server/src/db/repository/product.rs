//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, description, price, original_price, category_id, artisan_name, image, stock_quantity, is_active, created_at FROM products";

/// Find all active products, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE is_active = 1 ORDER BY created_at DESC",
        PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Find active products in a category
pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE category_id = ? AND is_active = 1 ORDER BY created_at DESC",
        PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{} WHERE id = ?", PRODUCT_SELECT);
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if data.price < 0.0 {
        return Err(RepoError::Validation("price cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO products (id, name, description, price, original_price, category_id, artisan_name, image, stock_quantity, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.description.unwrap_or_default())
    .bind(data.price)
    .bind(data.original_price)
    .bind(data.category_id)
    .bind(&data.artisan_name)
    .bind(data.image.unwrap_or_default())
    .bind(data.stock_quantity.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE products SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), original_price = COALESCE(?4, original_price), category_id = COALESCE(?5, category_id), artisan_name = COALESCE(?6, artisan_name), image = COALESCE(?7, image), stock_quantity = COALESCE(?8, stock_quantity), is_active = COALESCE(?9, is_active) WHERE id = ?10",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.original_price)
    .bind(data.category_id)
    .bind(data.artisan_name)
    .bind(data.image)
    .bind(data.stock_quantity)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Soft delete — orders keep referencing the row for display
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ? AND is_active = 1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
