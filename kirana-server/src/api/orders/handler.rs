//! 订单处理器

use axum::extract::{Path, State};
use axum::{Extension, Json};

use shared::models::{MessageResponse, Order, OrderCreateRequest, OrderStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::services;
use crate::utils::{AppError, AppResult};

/// POST /api/orders - 购物车结算下单
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<OrderCreateRequest>,
) -> AppResult<Json<Order>> {
    let record = services::checkout::place_order(&state, &user, request).await?;
    Ok(Json(record.into()))
}

/// GET /api/orders - 按角色过滤的订单列表
///
/// 管理员看全部，配送员看自己接的单和待接的已确认订单，顾客看本人订单。
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());

    let records = if user.is_admin() {
        repo.list_all().await?
    } else if user.is_agent() {
        repo.list_for_agent(&user.id).await?
    } else {
        repo.list_for_customer(&user.id).await?
    };

    Ok(Json(records.into_iter().map(Order::from).collect()))
}

/// GET /api/orders/{id} - 顾客只能看本人订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let record = OrderRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    if user.is_customer() && record.user_id != user.id {
        return Err(AppError::forbidden("Not authorized to view this order"));
    }

    Ok(Json(record.into()))
}

/// PUT /api/orders/{id}/status - 更新订单状态（非顾客）
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(update): Json<OrderStatusUpdate>,
) -> AppResult<Json<MessageResponse>> {
    if user.is_customer() {
        return Err(AppError::forbidden("Not authorized to update order status"));
    }

    OrderRepository::new(state.db.clone())
        .set_status(&id, &update.status)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(Json(MessageResponse::new("Order status updated")))
}

/// POST /api/orders/{id}/accept - 配送员接单，已被接的单返回 409
pub async fn accept(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = OrderRepository::new(state.db.clone());

    let record = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    if record.delivery_agent_id.is_some() {
        return Err(AppError::conflict("Order already accepted by another agent"));
    }

    repo.assign_agent(&id, &user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(Json(MessageResponse::new("Order accepted")))
}
