//! 认证接口

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/auth",
        Router::new()
            .route("/register", post(handler::register))
            .route("/login", post(handler::login))
            .route("/me", get(handler::me)),
    )
}
