//! Order Repository
//!
//! Checkout inserts the order and its line items in one transaction.
//! Cancellation and status advance are single conditional UPDATEs so a
//! user cancel racing an admin advance can never overwrite a terminal
//! state — exactly one of the two writes matches its WHERE clause.

use super::{RepoError, RepoResult};
use crate::orders::checkout::{self, PricedLine};
use crate::orders::lifecycle::CANCEL_WINDOW_MS;
use shared::models::{Order, OrderCreate, OrderItemDetail, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, order_number, user_id, total_amount, status, payment_status, payment_method, shipping_street, shipping_city, shipping_state, shipping_postal_code, shipping_country, shipping_phone, notes, created_at FROM orders";

/// Order number collisions are resolved by regenerating; the UNIQUE
/// constraint is the arbiter
const ORDER_NUMBER_ATTEMPTS: u32 = 3;

/// Create an order from a checkout payload.
///
/// Unit prices are captured from the products table inside the same
/// transaction as the inserts; they are never recalculated afterwards.
pub async fn create(pool: &SqlitePool, user_id: i64, data: OrderCreate) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;

    // Capture unit prices for every line
    let mut lines: Vec<PricedLine> = Vec::with_capacity(data.items.len());
    for item in &data.items {
        let price: Option<(f64,)> =
            sqlx::query_as("SELECT price FROM products WHERE id = ? AND is_active = 1")
                .bind(item.product_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (price,) = price.ok_or_else(|| {
            RepoError::NotFound(format!("Product {} not found", item.product_id))
        })?;
        lines.push(PricedLine {
            price,
            quantity: item.quantity,
        });
    }

    let total_amount = checkout::compute_total(&lines);
    let now = shared::util::now_millis();
    let order_id = shared::util::snowflake_id();
    let addr = &data.shipping_address;

    let mut attempt = 0;
    loop {
        let candidate = shared::util::order_number();
        let res = sqlx::query(
            "INSERT INTO orders (id, order_number, user_id, total_amount, status, payment_status, payment_method, shipping_street, shipping_city, shipping_state, shipping_postal_code, shipping_country, shipping_phone, notes, created_at) VALUES (?1, ?2, ?3, ?4, 'pending', 'pending', 'cod', ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(order_id)
        .bind(&candidate)
        .bind(user_id)
        .bind(total_amount)
        .bind(&addr.street)
        .bind(&addr.city)
        .bind(&addr.state)
        .bind(&addr.postal_code)
        .bind(&addr.country)
        .bind(&addr.phone)
        .bind(&data.notes)
        .bind(now)
        .execute(&mut *tx)
        .await;

        match res {
            Ok(_) => break,
            Err(e) => {
                let duplicate = matches!(&e, sqlx::Error::Database(d) if d.is_unique_violation());
                attempt += 1;
                if !duplicate || attempt >= ORDER_NUMBER_ATTEMPTS {
                    return Err(e.into());
                }
            }
        }
    }

    for (item, line) in data.items.iter().zip(&lines) {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, product_id, quantity, price) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(shared::util::snowflake_id())
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(line.price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Caller's orders, newest first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{} WHERE user_id = ? ORDER BY created_at DESC", ORDER_SELECT);
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch scoped to the owning user
pub async fn find_by_id_for_user(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ? AND user_id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All orders, paginated (admin view)
pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        ORDER_SELECT
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Line items joined with product display fields (name, image)
pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItemDetail>> {
    let rows = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price, p.name AS product_name, p.image AS product_image FROM order_items oi JOIN products p ON oi.product_id = p.id WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// User-initiated cancellation.
///
/// The eligibility check (non-terminal status AND inside the 5h window)
/// lives in the UPDATE's WHERE clause together with the write — a
/// read-then-write pair here would lose against a concurrent admin
/// advance to `delivered`.
pub async fn cancel(pool: &SqlitePool, id: i64, user_id: i64, now: i64) -> RepoResult<Order> {
    let rows = sqlx::query(
        "UPDATE orders SET status = 'cancelled' WHERE id = ?1 AND user_id = ?2 AND status NOT IN ('delivered', 'cancelled') AND ?3 - created_at <= ?4",
    )
    .bind(id)
    .bind(user_id)
    .bind(now)
    .bind(CANCEL_WINDOW_MS)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 1 {
        return find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")));
    }

    // Nothing matched: distinguish an absent/foreign order from an
    // ineligible one
    match find_by_id_for_user(pool, id, user_id).await? {
        None => Err(RepoError::NotFound(format!("Order {id} not found"))),
        Some(order) if order.status.is_terminal() => Err(RepoError::NotCancellable(format!(
            "Order {} is already {}",
            order.order_number, order.status
        ))),
        Some(order) => Err(RepoError::NotCancellable(format!(
            "Cancellation window for order {} has elapsed",
            order.order_number
        ))),
    }
}

/// Admin status advance, guarded by the expected current status.
///
/// `rows_affected == 0` means the row moved under us (e.g. the user
/// cancelled first); the caller gets a conflict, never a blind write.
pub async fn advance_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2 AND status = ?3")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 1 {
        return find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")));
    }

    match find_by_id(pool, id).await? {
        None => Err(RepoError::NotFound(format!("Order {id} not found"))),
        Some(order) => Err(RepoError::Conflict(format!(
            "Order {} is {}, expected {}",
            order.order_number, order.status, from
        ))),
    }
}

/// Test seam: orders are created with the current timestamp; window
/// tests rewind `created_at` instead of sleeping
#[cfg(test)]
pub async fn set_created_at(pool: &SqlitePool, id: i64, created_at: i64) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET created_at = ? WHERE id = ?")
        .bind(created_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
