//! Kirana Server - 社区杂货配送电商后端
//!
//! # 架构概述
//!
//! 本模块是配送后端的主入口，提供以下核心功能：
//!
//! - **地理围栏** (`geo`): 配送区域解析（射线法 + 数据库原生几何查询）
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **业务服务** (`services`): 下单结算、路线优化代理
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! kirana-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色校验
//! ├── db/            # 数据库层（模型 + 仓储）
//! ├── geo/           # 多边形、区域归一化、坐标提取、距离
//! ├── services/      # 结算与路线优化
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod geo;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 认证相关事件统一走 "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}

/// 设置进程环境 (dotenv + 日志)
///
/// 读取 `.env` 后按 `LOG_LEVEL` / `LOG_DIR` 初始化 tracing。
pub fn setup_environment() -> anyhow::Result<()> {
    use anyhow::Context;

    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();

    if let Some(dir) = log_dir.as_deref() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {dir}"))?;
    }

    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __ __ _
   / //_/(_)________ _____  ____ _
  / ,<  / / ___/ __ `/ __ \/ __ `/
 / /| |/ / /  / /_/ / / / / /_/ /
/_/ |_/_/_/   \__,_/_/ /_/\__,_/
    "#
    );
}
