//! 路线优化接口（配送员 / 管理员）

mod handler;

use axum::Router;
use axum::middleware;
use axum::routing::post;

use shared::models::{ROLE_ADMIN, ROLE_DELIVERY_AGENT};

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/route/optimize", post(handler::optimize))
        .layer(middleware::from_fn(require_roles(&[
            ROLE_DELIVERY_AGENT,
            ROLE_ADMIN,
        ])))
}
