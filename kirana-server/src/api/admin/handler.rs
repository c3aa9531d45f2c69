//! 管理后台处理器

use axum::Json;
use axum::extract::State;

use shared::models::{AdminStats, ROLE_CUSTOMER, ROLE_DELIVERY_AGENT};

use crate::core::ServerState;
use crate::db::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::utils::AppResult;

/// GET /api/admin/stats - 看板统计
///
/// 营收只统计已送达订单。
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AdminStats>> {
    let products = ProductRepository::new(state.db.clone());
    let orders = OrderRepository::new(state.db.clone());
    let users = UserRepository::new(state.db.clone());

    Ok(Json(AdminStats {
        total_products: products.count().await?,
        total_orders: orders.count().await?,
        total_customers: users.count_by_role(ROLE_CUSTOMER).await?,
        total_agents: users.count_by_role(ROLE_DELIVERY_AGENT).await?,
        total_revenue: orders.revenue_delivered().await?,
    }))
}
