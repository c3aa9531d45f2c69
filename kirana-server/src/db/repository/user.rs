//! 用户仓储

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{UserCreate, UserRecord};
use crate::db::repository::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};

pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 创建用户，邮箱重复返回 [`RepoError::Duplicate`]
    ///
    /// 除应用层预检外，`users_email_idx` 唯一索引兜底并发注册。
    pub async fn create(&self, data: UserCreate) -> RepoResult<UserRecord> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already registered".to_string()));
        }

        let hash = UserRecord::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        let mut result = self
            .base
            .db()
            .query(
                "CREATE users SET \
                    email = $email, \
                    hash_pass = $hash, \
                    name = $name, \
                    role = $role, \
                    phone = $phone, \
                    address = $address, \
                    delivery_zone_id = NONE, \
                    created_at = $created_at \
                 RETURN AFTER",
            )
            .bind(("email", data.email))
            .bind(("hash", hash))
            .bind(("name", data.name))
            .bind(("role", data.role))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("created_at", Utc::now()))
            .await?;

        result
            .take::<Option<UserRecord>>(0)?
            .ok_or_else(|| RepoError::Database("User creation returned no record".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM users WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;

        Ok(result.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserRecord>> {
        let record_id = parse_record_id(id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    /// 配送员绑定区域
    pub async fn set_delivery_zone(&self, user_id: &str, zone_id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(user_id)?;

        self.base
            .db()
            .query("UPDATE $user SET delivery_zone_id = $zone")
            .bind(("user", record_id))
            .bind(("zone", zone_id.to_string()))
            .await?
            .check()?;

        Ok(())
    }

    pub async fn count_by_role(&self, role: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM users WHERE role = $role GROUP ALL")
            .bind(("role", role.to_string()))
            .await?;

        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
