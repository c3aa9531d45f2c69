//! 管理后台接口

mod handler;

use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/stats", get(handler::stats))
        .layer(middleware::from_fn(require_admin))
}
