//! Order API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::checkout;
use crate::orders::lifecycle::{self, StatusDisplay};
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderCreate, OrderItemDetail, OrderStatus};

/// Order with line items and badge hints, as rendered by the UI
#[derive(serde::Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub status_display: StatusDisplay,
    /// Whether the owner can still cancel, evaluated at response time
    pub cancellable: bool,
}

fn order_detail(order: Order, items: Vec<OrderItemDetail>) -> OrderDetail {
    let status_display = lifecycle::status_display(order.status.as_str());
    let cancellable = lifecycle::is_cancellable(
        order.status,
        order.created_at,
        shared::util::now_millis(),
    );
    OrderDetail {
        order,
        items,
        status_display,
        cancellable,
    }
}

/// POST /api/orders - 下单（从购物车 + 收货地址创建订单）
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    checkout::validate_checkout(&payload).map_err(|missing| {
        AppError::validation(format!(
            "Missing or invalid fields: {}",
            missing.join(", ")
        ))
    })?;

    let created = order::create(&state.pool, current_user.id, payload).await?;
    let items = order::find_items(&state.pool, created.id).await?;

    tracing::info!(
        user_id = %current_user.id,
        order_number = %created.order_number,
        total = created.total_amount,
        "Order placed"
    );

    Ok(Json(order_detail(created, items)))
}

/// GET /api/orders/mine - 当前用户的订单列表
pub async fn list_mine(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_by_user(&state.pool, current_user.id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 单个订单（含行项目和收货地址）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    // 管理员可以查看任意订单，普通用户仅限本人
    let found = if current_user.is_admin {
        order::find_by_id(&state.pool, id).await?
    } else {
        order::find_by_id_for_user(&state.pool, id, current_user.id).await?
    };
    let found = found.ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

    let items = order::find_items(&state.pool, found.id).await?;

    Ok(Json(order_detail(found, items)))
}

/// POST /api/orders/:id/cancel - 用户在取消窗口内取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let now = shared::util::now_millis();
    let cancelled = order::cancel(&state.pool, id, current_user.id, now).await?;

    tracing::info!(
        user_id = %current_user.id,
        order_number = %cancelled.order_number,
        "Order cancelled by user"
    );

    Ok(Json(cancelled))
}

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/admin/orders - 全部订单（分页，管理员）
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(&state.pool, query.limit, query.offset).await?;
    Ok(Json(orders))
}

/// Status advance request
#[derive(Debug, Deserialize)]
pub struct AdvanceStatusRequest {
    pub status: OrderStatus,
}

/// PUT /api/admin/orders/:id/status - 推进订单状态（管理员）
///
/// 仅允许单步前进；条件更新保证与用户取消竞争时只有一方生效。
pub async fn advance_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AdvanceStatusRequest>,
) -> AppResult<Json<Order>> {
    let current = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

    if !lifecycle::can_transition(current.status, payload.status) {
        return Err(AppError::business_rule(format!(
            "Cannot move order {} from {} to {}",
            current.order_number, current.status, payload.status
        )));
    }

    let advanced = order::advance_status(&state.pool, id, current.status, payload.status).await?;

    tracing::info!(
        admin_id = %current_user.id,
        order_number = %advanced.order_number,
        status = %advanced.status,
        "Order status advanced"
    );

    Ok(Json(advanced))
}
