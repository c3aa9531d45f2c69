//! 仓储层
//!
//! 每个表一个仓储，共享 [`BaseRepository`] 的数据库句柄。
//! 仓储只返回 [`RepoError`]，HTTP 语义映射在 `utils::error` 完成。

pub mod cart;
pub mod order;
pub mod product;
pub mod user;
pub mod zone;

pub use cart::CartRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
pub use zone::ZoneRepository;

use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// 仓储共享的数据库句柄
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// 解析 `table:key` 形式的记录 ID
pub(crate) fn parse_record_id(id: &str) -> RepoResult<RecordId> {
    id.parse::<RecordId>()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {id}")))
}

/// `SELECT count() ... GROUP ALL` 的行结构
///
/// 空表不返回行，调用方用 `unwrap_or(0)` 补零。
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}
