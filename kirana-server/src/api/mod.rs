//! HTTP API
//!
//! 每个资源一个子模块（`router()` + `handler`），在 [`build_router`]
//! 合并，[`build_app`] 叠加中间件栈：
//!
//! Request ID → CORS → 压缩 → Trace → 认证 → 路由

pub mod admin;
pub mod auth;
pub mod cart;
pub mod convert;
pub mod health;
pub mod orders;
pub mod products;
pub mod routing;
pub mod zones;

pub mod router_ext;
pub use router_ext::{OneshotResult, OneshotRouter};

use axum::Router;
use axum::middleware;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// `x-request-id` 生成器
#[derive(Clone, Default)]
pub struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        http::HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// 合并全部资源路由
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(zones::router())
        .merge(routing::router())
        .merge(admin::router())
}

/// 路由 + 中间件栈
///
/// `.layer` 后加的在外层：Request ID 最外，认证最贴近路由。
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(XRequestId))
}
