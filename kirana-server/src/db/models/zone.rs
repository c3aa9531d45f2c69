//! 配送区域记录模型
//!
//! 两代数据形态并存：
//! - 规范形态：`geometry` 为 GeoJSON Polygon（数据库内是原生几何值）
//! - 旧版形态：`coordinates` 为 `{lat, lng}` 顶点数组，无 `geometry`
//!
//! 读取侧统一经 [`crate::geo::normalize`] 归一化后再对外暴露。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{LegacyPoint, ZoneGeometry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    /// 旧版顶点数组，仅历史数据携带
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<LegacyPoint>>,
    /// GeoJSON Polygon，规范形态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<ZoneGeometry>,
    #[serde(default)]
    pub assigned_agents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
