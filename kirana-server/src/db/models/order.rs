//! 订单记录模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::{DeliveryEstimate, DeliveryLocation, OrderItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_address: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: String,
    /// 接单配送员，未接单时为 NONE
    #[serde(default)]
    pub delivery_agent_id: Option<String>,
    /// 下单时解析出的配送坐标
    #[serde(default)]
    pub delivery_location: Option<DeliveryLocation>,
    #[serde(default)]
    pub estimated_delivery_time: Option<DeliveryEstimate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
