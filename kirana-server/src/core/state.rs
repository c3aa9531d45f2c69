//! 服务器共享状态
//!
//! `ServerState` 在所有请求处理器之间共享，持有：
//! - 嵌入式 SurrealDB 连接
//! - JWT 服务
//! - 出站 HTTP 客户端（OSRM 路由代理用）

use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// 服务器共享状态
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub http_client: reqwest::Client,
}

impl ServerState {
    /// 从已有组件构造状态（测试也走这里）
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.routing_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            config,
            db,
            jwt_service,
            http_client,
        }
    }

    /// 初始化共享状态
    ///
    /// 启动阶段失败直接 panic：没有数据库就没有服务。
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let database = DbService::new(config.database_dir())
            .await
            .expect("Failed to initialize database");
        tracing::info!(path = %config.database_dir().display(), "Database initialized");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), database.db, jwt_service)
    }

    pub fn get_db(&self) -> &Surreal<Db> {
        &self.db
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
