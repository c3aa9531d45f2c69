//! 订单接口
//!
//! 接单入口仅配送员；状态更新的角色限制在处理器内判定
//! （管理员与配送员都可更新）。

mod handler;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use shared::models::ROLE_DELIVERY_AGENT;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let base_routes = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status));

    let agent_routes = Router::new()
        .route("/{id}/accept", post(handler::accept))
        .layer(middleware::from_fn(require_roles(&[ROLE_DELIVERY_AGENT])));

    Router::new().nest("/api/orders", base_routes.merge(agent_routes))
}
