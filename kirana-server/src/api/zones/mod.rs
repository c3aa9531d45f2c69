//! 配送区域接口
//!
//! 查看需登录，创建与配送员分配仅管理员。

mod handler;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/assign-agent", put(handler::assign_agent))
        .layer(middleware::from_fn(require_admin));

    Router::new().nest("/api/delivery-zones", read_routes.merge(manage_routes))
}
