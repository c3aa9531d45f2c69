//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// Order lifecycle states
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_PREPARING: &str = "preparing";
pub const STATUS_OUT_FOR_DELIVERY: &str = "out_for_delivery";
pub const STATUS_DELIVERED: &str = "delivered";
pub const STATUS_CANCELLED: &str = "cancelled";

/// One ordered line, priced at checkout time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Resolved delivery point persisted on the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeliveryLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Fixed-speed delivery estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub minutes: i64,
    pub formatted: String,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_address: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: String,
    pub delivery_agent_id: Option<String>,
    pub delivery_location: Option<DeliveryLocation>,
    pub estimated_delivery_time: Option<DeliveryEstimate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Explicit coordinates supplied with an order.
///
/// Values arrive as raw JSON so that numbers and numeric strings are both
/// accepted, and anything else is rejected with a meaningful message instead
/// of a body-level deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryCoordinates {
    pub latitude: Option<serde_json::Value>,
    pub longitude: Option<serde_json::Value>,
}

/// Checkout payload.
///
/// `items` is accepted for client convenience but the server-side cart is
/// authoritative for what gets ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub delivery_address: String,
    pub delivery_coordinates: Option<DeliveryCoordinates>,
}

/// Status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}
