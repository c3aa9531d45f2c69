//! 商品接口
//!
//! 读公开，写仅管理员。

mod handler;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::remove))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .nest("/api/products", read_routes.merge(manage_routes))
        .route("/api/categories", get(handler::categories))
}
