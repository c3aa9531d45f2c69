//! 服务器启动 / 运行期错误
//!
//! 请求处理期间的错误走 [`crate::utils::AppError`]，
//! 这里只覆盖启动与监听阶段。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
