//! HTTP 服务器
//!
//! 绑定监听端口，挂载 API 路由，支持 Ctrl+C 优雅停机。

use std::net::SocketAddr;

use anyhow::Context;

use crate::api;
use crate::core::error::Result;
use crate::core::{Config, ServerState};

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// 使用预先初始化的状态构造服务器
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// 运行服务器直至收到停机信号
    pub async fn run(self) -> Result<()> {
        let state = match self.state {
            Some(state) => state,
            None => ServerState::initialize(&self.config).await,
        };

        let app = api::build_app(&state).with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        tracing::info!(address = %addr, "Kirana Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
