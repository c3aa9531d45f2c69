//! JWT 令牌服务
//!
//! 使用 HS256 对称签名。令牌主体为用户记录 ID，角色冗余存入
//! claims 供日志使用；权限判定始终以数据库中的用户为准。

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 开发环境兜底密钥，生产环境必须通过 JWT_SECRET 覆盖
const DEV_FALLBACK_SECRET: &str = "kirana-dev-secret-do-not-use-in-production-0001";

/// 默认令牌有效期：30 天
const DEFAULT_EXPIRATION_MINUTES: i64 = 43200;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_FALLBACK_SECRET.to_string(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

impl JwtConfig {
    /// 从环境变量加载 (`JWT_SECRET` / `JWT_EXPIRATION_MINUTES`)
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => {
                if secret.len() < 32 {
                    tracing::warn!("JWT_SECRET is shorter than 32 characters");
                }
                secret
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, using development fallback secret");
                DEV_FALLBACK_SECRET.to_string()
            }
        };

        let expiration_minutes = std::env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXPIRATION_MINUTES);

        Self {
            secret,
            expiration_minutes,
        }
    }
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户记录 ID
    pub sub: String,
    /// 签发时的用户角色
    pub role: String,
    /// 过期时间 (Unix 秒)
    pub exp: i64,
    /// 签发时间 (Unix 秒)
    pub iat: i64,
}

/// JWT 签发与校验服务
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户签发令牌
    pub fn generate_token(&self, user_id: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 校验令牌并返回 claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// 从 `Authorization` 头中提取 Bearer 令牌
    pub fn extract_from_header(header: &str) -> Result<&str, JwtError> {
        header
            .strip_prefix("Bearer ")
            .ok_or_else(|| JwtError::InvalidToken("Expected Bearer authentication scheme".into()))
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}
