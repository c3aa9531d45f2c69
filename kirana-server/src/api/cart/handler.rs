//! 购物车处理器

use axum::extract::{Path, State};
use axum::{Extension, Json};
use surrealdb::RecordId;

use shared::models::{CartEntry, CartItem, CartView, MessageResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

/// GET /api/cart - 当前用户购物车，行内关联商品详情
pub async fn get_cart(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CartView>> {
    let carts = CartRepository::new(state.db.clone());
    let products = ProductRepository::new(state.db.clone());

    let cart = carts.get_or_create(&user.id).await?;

    let mut entries = Vec::new();
    for line in cart.items {
        // 商品已下架的行不展示
        let Ok(record_id) = line.product_id.parse::<RecordId>() else {
            continue;
        };
        let Some(product) = products.find_by_record_id(&record_id).await? else {
            continue;
        };

        entries.push(CartEntry {
            product_id: line.product_id,
            quantity: line.quantity,
            product: product.into(),
        });
    }

    Ok(Json(CartView { items: entries }))
}

/// POST /api/cart/add - 加购（同商品合并数量）
pub async fn add(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(item): Json<CartItem>,
) -> AppResult<Json<MessageResponse>> {
    let products = ProductRepository::new(state.db.clone());
    if products.find_by_id(&item.product_id).await?.is_none() {
        return Err(AppError::not_found("Product not found"));
    }

    CartRepository::new(state.db.clone())
        .add_item(&user.id, &item.product_id, item.quantity)
        .await?;

    Ok(Json(MessageResponse::new("Item added to cart")))
}

/// POST /api/cart/update - 改量（行不存在时静默跳过）
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(item): Json<CartItem>,
) -> AppResult<Json<MessageResponse>> {
    CartRepository::new(state.db.clone())
        .set_quantity(&user.id, &item.product_id, item.quantity)
        .await?;

    Ok(Json(MessageResponse::new("Cart updated")))
}

/// POST /api/cart/remove/{product_id}
pub async fn remove(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    CartRepository::new(state.db.clone())
        .remove_item(&user.id, &product_id)
        .await?;

    Ok(Json(MessageResponse::new("Item removed from cart")))
}

/// DELETE /api/cart/clear
pub async fn clear(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<MessageResponse>> {
    CartRepository::new(state.db.clone()).clear(&user.id).await?;
    Ok(Json(MessageResponse::new("Cart cleared")))
}
