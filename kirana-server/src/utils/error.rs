//! 统一错误处理
//!
//! 所有 API 错误通过 [`AppError`] 转换为带错误码的 JSON 响应：
//!
//! ```json
//! { "code": "E0003", "message": "Product not found" }
//! ```
//!
//! 错误码分类：
//! - `E0xxx`: 通用错误（校验、资源不存在、冲突）
//! - `E2xxx`: 权限错误
//! - `E3xxx`: 认证错误
//! - `E8xxx`: 上游服务错误（路由代理）
//! - `E9xxx`: 系统内部错误

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::auth::JwtError;
use crate::db::repository::RepoError;

/// 应用统一错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 未登录或令牌缺失
    #[error("Please login first")]
    Unauthorized,

    /// 令牌已过期
    #[error("Token has expired")]
    TokenExpired,

    /// 令牌无效
    #[error("Invalid token")]
    InvalidToken,

    /// 登录凭证错误（用户不存在与密码错误统一为同一响应）
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 权限不足
    #[error("{0}")]
    Forbidden(String),

    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 资源冲突（重复注册、订单已被接单）
    #[error("{0}")]
    Conflict(String),

    /// 请求校验失败
    #[error("{0}")]
    Validation(String),

    /// 依赖服务不可达
    #[error("{0}")]
    Unavailable(String),

    /// 上游服务返回错误，原样转发状态码
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// 数据库错误（对外隐藏细节）
    #[error("Database error: {0}")]
    Database(String),

    /// 内部错误（对外隐藏细节）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        AppError::Unavailable(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        AppError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        AppError::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    /// 机器可读错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "E0002",
            AppError::NotFound(_) => "E0003",
            AppError::Conflict(_) => "E0004",
            AppError::Forbidden(_) => "E2001",
            AppError::Unauthorized => "E3001",
            AppError::InvalidToken => "E3002",
            AppError::TokenExpired => "E3003",
            AppError::InvalidCredentials => "E3004",
            AppError::Unavailable(_) => "E8001",
            AppError::Upstream { .. } => "E8002",
            AppError::Internal(_) => "E9001",
            AppError::Database(_) => "E9002",
        }
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized
            | AppError::TokenExpired
            | AppError::InvalidToken
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // 内部错误只记录日志，不向客户端暴露细节
        let message = match &self {
            AppError::Database(detail) => {
                tracing::error!(target: "database", error = %detail, "Database operation failed");
                "Database operation failed".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(message) => AppError::NotFound(message),
            RepoError::Duplicate(message) => AppError::Conflict(message),
            RepoError::Validation(message) => AppError::Validation(message),
            RepoError::Database(message) => AppError::Database(message),
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::TokenExpired,
            JwtError::InvalidToken(_) | JwtError::InvalidSignature => AppError::InvalidToken,
            JwtError::GenerationFailed(detail) => AppError::Internal(detail),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_status() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.error_code(), "E3001");
        assert_eq!(
            AppError::conflict("Order already accepted by another agent").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::validation("Cart is empty").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let err = AppError::upstream(429, "Routing service error: too many requests");
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.error_code(), "E8002");

        // 非法状态码回退到 502
        let err = AppError::upstream(1000, "bad");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn repo_errors_map_to_http_semantics() {
        let err: AppError = RepoError::Duplicate("Email already registered".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: AppError = RepoError::NotFound("Product not found".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
