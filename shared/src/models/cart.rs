//! Cart Model

use serde::{Deserialize, Serialize};

use super::product::Product;

/// One cart line: product reference plus desired quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i32,
}

/// Cart line joined with its product document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: i32,
    pub product: Product,
}

/// Cart as returned by `GET /api/cart`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartEntry>,
}
