//! 商品记录模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::ProductCreate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub unit: String,
    pub variant: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    /// 从创建请求构造一条新记录
    pub fn from_create(data: ProductCreate) -> Self {
        Self {
            id: None,
            name: data.name,
            brand: data.brand,
            description: data.description,
            price: data.price,
            category: data.category,
            stock: data.stock,
            unit: data.unit,
            variant: data.variant,
            code: data.code,
            barcode: data.barcode,
            image: data.image,
            created_at: Utc::now(),
        }
    }
}
