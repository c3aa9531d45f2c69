//! 购物车记录模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::CartItem;

/// 每个用户至多一条购物车记录（user_id 唯一索引）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}
