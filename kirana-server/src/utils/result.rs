//! 应用层 Result 类型

use crate::utils::error::AppError;

/// 请求处理器统一返回类型
pub type AppResult<T> = Result<T, AppError>;
