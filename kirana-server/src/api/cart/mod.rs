//! 购物车接口

mod handler;

use axum::Router;
use axum::routing::{delete, get, post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/cart",
        Router::new()
            .route("/", get(handler::get_cart))
            .route("/add", post(handler::add))
            .route("/update", post(handler::update))
            .route("/remove/{product_id}", post(handler::remove))
            .route("/clear", delete(handler::clear)),
    )
}
