//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    /// Sales unit, e.g. "kg", "pcs", "500ml"
    pub unit: String,
    pub variant: String,
    pub code: Option<String>,
    pub barcode: Option<String>,
    /// Base64-encoded image payload
    pub image: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/replace product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub unit: String,
    pub variant: String,
    pub code: Option<String>,
    pub barcode: Option<String>,
    pub image: String,
}

/// Paginated product listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub total: i64,
    pub products: Vec<Product>,
}

/// Distinct category names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}
