//! Router 进程内调用扩展
//!
//! 不经网络栈、带完整中间件链直接驱动请求，集成测试使用。

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use tower::Service;

use crate::core::ServerState;

/// 进程内调用的结果类型
pub type OneshotResult = Result<Response<Body>>;

/// 为 [`Router`] 提供 `oneshot` 调用
#[async_trait]
pub trait OneshotRouter {
    /// 处理单个请求并返回响应
    ///
    /// ```ignore
    /// let app = api::build_app(&state);
    /// let request = Request::builder()
    ///     .uri("/api/health")
    ///     .body(Body::empty())?;
    /// let response = app.oneshot(&state, request).await?;
    /// ```
    async fn oneshot(&self, state: &ServerState, request: Request<Body>) -> OneshotResult;
}

#[async_trait]
impl OneshotRouter for Router<ServerState> {
    async fn oneshot(&self, state: &ServerState, request: Request<Body>) -> OneshotResult {
        // 每次调用克隆一份路由并注入状态
        let mut service = self.clone().with_state(state.clone());
        let response = service.call(request).await?;
        Ok(response)
    }
}
