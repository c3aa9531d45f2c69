//! 配送区域解析
//!
//! 两级策略：
//! 1. 数据库原生几何包含查询（只对携带 geometry 的记录可见）
//! 2. 仅当原生查询执行失败时，回退到全量扫描 + 射线法
//!
//! 原生查询成功返回空结果是权威答案，不触发回退。回退路径会把
//! 旧版记录也归一化后参与判定，覆盖面比原生路径更广。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::DeliveryZone;

use crate::db::repository::{RepoResult, ZoneRepository};
use crate::geo::normalize::normalize_record;
use crate::geo::polygon::point_in_ring;

pub struct ZoneResolver {
    repo: ZoneRepository,
}

impl ZoneResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: ZoneRepository::new(db),
        }
    }

    /// 解析坐标所属配送区域
    pub async fn resolve(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> RepoResult<Option<DeliveryZone>> {
        match self.resolve_native(longitude, latitude).await {
            Ok(zone) => Ok(zone),
            Err(err) => {
                tracing::warn!(
                    target: "zones",
                    error = %err,
                    "Native containment query failed, falling back to manual scan"
                );
                self.resolve_by_scan(longitude, latitude).await
            }
        }
    }

    /// 原生几何包含查询
    pub async fn resolve_native(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> RepoResult<Option<DeliveryZone>> {
        let record = self.repo.find_containing(longitude, latitude).await?;
        Ok(record.and_then(normalize_record))
    }

    /// 回退路径：全量加载，逐个归一化后对外环做射线法判定
    pub async fn resolve_by_scan(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> RepoResult<Option<DeliveryZone>> {
        let records = self.repo.find_all().await?;

        for record in records {
            let Some(zone) = normalize_record(record) else {
                continue;
            };
            let Some(ring) = zone.geometry.outer_ring() else {
                continue;
            };

            if point_in_ring(longitude, latitude, ring) {
                return Ok(Some(zone));
            }
        }

        Ok(None)
    }
}
