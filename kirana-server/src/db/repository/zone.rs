//! 配送区域仓储

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::ZoneGeometry;

use crate::db::models::ZoneRecord;
use crate::db::repository::{BaseRepository, RepoError, RepoResult, parse_record_id};

pub struct ZoneRepository {
    base: BaseRepository,
}

impl ZoneRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<ZoneRecord>> {
        let mut result = self.base.db().query("SELECT * FROM delivery_zones").await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ZoneRecord>> {
        let record_id = parse_record_id(id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    /// 写入规范形态的区域（geometry 字段经表定义转成原生多边形）
    pub async fn create_normalized(
        &self,
        name: String,
        geometry: ZoneGeometry,
    ) -> RepoResult<ZoneRecord> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE delivery_zones SET \
                    name = $name, \
                    geometry = $geometry, \
                    assigned_agents = [], \
                    created_at = $now \
                 RETURN AFTER",
            )
            .bind(("name", name))
            .bind(("geometry", geometry))
            .bind(("now", Utc::now()))
            .await?;

        result
            .take::<Option<ZoneRecord>>(0)?
            .ok_or_else(|| RepoError::Database("Zone creation returned no record".to_string()))
    }

    /// 原生几何包含查询
    ///
    /// 只有携带 geometry 字段的记录可命中；旧版记录对这条查询不可见，
    /// 由 [`crate::geo::resolver`] 的回退扫描覆盖。
    pub async fn find_containing(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> RepoResult<Option<ZoneRecord>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM delivery_zones \
                 WHERE geometry INTERSECTS type::point([$lng, $lat]) \
                 LIMIT 1",
            )
            .bind(("lng", longitude))
            .bind(("lat", latitude))
            .await?;

        Ok(result.take(0)?)
    }

    /// 追加配送员（幂等，已存在时不重复）
    pub async fn add_agent(&self, zone_id: &str, agent_id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(zone_id)?;

        self.base
            .db()
            .query("UPDATE $zone SET assigned_agents = array::union(assigned_agents, [$agent_id])")
            .bind(("zone", record_id))
            .bind(("agent_id", agent_id.to_string()))
            .await?
            .check()?;

        Ok(())
    }
}
