//! 商品处理器

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use shared::models::{CategoryList, MessageResponse, Product, ProductCreate, ProductPage};

use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/products - 分页商品列表，可按分类过滤（公开）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let repo = ProductRepository::new(state.db.clone());
    let (total, records) = repo
        .find_page(query.category.as_deref(), page, limit)
        .await?;

    Ok(Json(ProductPage {
        total,
        products: records.into_iter().map(Product::from).collect(),
    }))
}

/// GET /api/products/{id}（公开）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let record = ProductRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(record.into()))
}

/// POST /api/products - 新增商品（管理员）
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let record = ProductRepository::new(state.db.clone()).create(data).await?;
    Ok(Json(record.into()))
}

/// PUT /api/products/{id} - 整体更新（管理员）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let record = ProductRepository::new(state.db.clone())
        .replace(&id, data)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(record.into()))
}

/// DELETE /api/products/{id}（管理员）
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = ProductRepository::new(state.db.clone()).delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// GET /api/categories - 去重分类列表（公开）
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<CategoryList>> {
    let categories = ProductRepository::new(state.db.clone()).categories().await?;
    Ok(Json(CategoryList { categories }))
}
