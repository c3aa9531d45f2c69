//! 记录模型 → API DTO 转换
//!
//! 记录侧的 `RecordId` 统一转成 `table:key` 字符串对外。

use surrealdb::RecordId;

use shared::models::{Order, Product, UserProfile};

use crate::auth::CurrentUser;
use crate::db::models::{OrderRecord, ProductRecord, UserRecord};

pub fn record_id_to_string(id: &RecordId) -> String {
    id.to_string()
}

pub fn option_id_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(record_id_to_string)
}

impl From<UserRecord> for UserProfile {
    fn from(record: UserRecord) -> Self {
        Self {
            id: option_id_to_string(&record.id),
            email: record.email,
            name: record.name,
            role: record.role,
            phone: record.phone,
            address: record.address,
            delivery_zone_id: record.delivery_zone_id,
        }
    }
}

impl From<CurrentUser> for UserProfile {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: Some(user.id),
            email: user.email,
            name: user.name,
            role: user.role,
            phone: user.phone,
            address: user.address,
            delivery_zone_id: user.delivery_zone_id,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: option_id_to_string(&record.id),
            name: record.name,
            brand: record.brand,
            description: record.description,
            price: record.price,
            category: record.category,
            stock: record.stock,
            unit: record.unit,
            variant: record.variant,
            code: record.code,
            barcode: record.barcode,
            image: record.image,
            created_at: Some(record.created_at),
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: option_id_to_string(&record.id),
            user_id: record.user_id,
            user_name: record.user_name,
            user_phone: record.user_phone,
            user_address: record.user_address,
            items: record.items,
            total_amount: record.total_amount,
            status: record.status,
            delivery_agent_id: record.delivery_agent_id,
            delivery_location: record.delivery_location,
            estimated_delivery_time: record.estimated_delivery_time,
            created_at: Some(record.created_at),
            updated_at: Some(record.updated_at),
        }
    }
}
