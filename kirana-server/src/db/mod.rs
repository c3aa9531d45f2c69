//! 数据库层
//!
//! 嵌入式 SurrealDB (RocksDB 引擎)。表结构保持 SCHEMALESS，
//! 仅对关键字段做显式定义：
//! - `users.email` 唯一索引
//! - `delivery_zones.geometry` 原生多边形类型（支持 INTERSECTS 包含查询）

pub mod models;
pub mod repository;
pub mod schema;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// 数据库服务
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// 打开（或创建）数据库并执行表结构初始化
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, surrealdb::Error> {
        let db = Surreal::new::<RocksDb>(path.as_ref()).await?;
        db.use_ns("kirana").use_db("kirana").await?;

        schema::initialize(&db).await?;

        Ok(Self { db })
    }
}
