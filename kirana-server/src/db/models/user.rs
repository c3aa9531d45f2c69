//! 用户记录模型

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// 用户记录
///
/// `hash_pass` 标记 `skip_serializing`，任何序列化路径（API 响应、日志）
/// 都不会带出散列值；写入数据库走显式 SET 绑定。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// 配送员绑定的区域 ID
    #[serde(default)]
    pub delivery_zone_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Argon2 散列密码
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// 校验明文密码，散列损坏时视为不匹配
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.hash_pass)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// 新用户数据，密码为明文，由仓储层散列
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
