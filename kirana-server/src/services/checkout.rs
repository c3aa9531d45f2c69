//! 下单结算
//!
//! 流程：购物车校验 → 坐标提取 → 区域解析 → 逐行条件扣库存 →
//! 订单落库 → 清空购物车。任何一行库存不足或订单落库失败时，
//! 回补此前已扣的所有行。

use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::RecordId;

use shared::models::{
    DeliveryLocation, OrderCreateRequest, OrderItem, STATUS_PENDING,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::OrderRecord;
use crate::db::repository::{CartRepository, OrderRepository, ProductRepository};
use crate::geo::extract::{CoordinateExtraction, extract_coordinates};
use crate::geo::{ZoneResolver, delivery_estimate, haversine_km};
use crate::services::money::{line_total, to_f64};
use crate::utils::{AppError, AppResult};

const NO_COORDINATES_MESSAGE: &str = "Could not extract coordinates from delivery address. \
     Please include coordinates in format 'lat,lng: 13.1056,77.5951' at the end of the address \
     or provide delivery_coordinates object";

const OUT_OF_ZONE_MESSAGE: &str =
    "Delivery not available for this address. The location is outside all delivery zones.";

/// 结算下单
///
/// 以服务端购物车为准；请求体里的 items 忽略。
pub async fn place_order(
    state: &ServerState,
    user: &CurrentUser,
    request: OrderCreateRequest,
) -> AppResult<OrderRecord> {
    let carts = CartRepository::new(state.db.clone());
    let products = ProductRepository::new(state.db.clone());
    let orders = OrderRepository::new(state.db.clone());

    let items = carts
        .find_by_user(&user.id)
        .await?
        .map(|cart| cart.items)
        .unwrap_or_default();
    if items.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let (latitude, longitude) = match extract_coordinates(
        request.delivery_coordinates.as_ref(),
        &request.delivery_address,
    ) {
        CoordinateExtraction::Found {
            latitude,
            longitude,
        } => (latitude, longitude),
        CoordinateExtraction::Invalid(message) => return Err(AppError::validation(message)),
        CoordinateExtraction::NotFound => {
            return Err(AppError::validation(NO_COORDINATES_MESSAGE));
        }
    };

    let resolver = ZoneResolver::new(state.db.clone());
    let Some(zone) = resolver.resolve(longitude, latitude).await? else {
        return Err(AppError::validation(OUT_OF_ZONE_MESSAGE));
    };
    tracing::info!(
        target: "orders",
        zone = %zone.name,
        user = %user.id,
        "Delivery point resolved"
    );

    // 逐行条件扣减，(RecordId, 数量) 记入 applied 供失败回补
    let mut applied: Vec<(RecordId, i32)> = Vec::new();
    let mut order_items: Vec<OrderItem> = Vec::new();
    let mut total = Decimal::ZERO;

    for line in &items {
        // 商品已消失的行直接跳过
        let Ok(product_id) = line.product_id.parse::<RecordId>() else {
            tracing::debug!(
                target: "orders",
                product = %line.product_id,
                "Skipping cart line with unparseable product ID"
            );
            continue;
        };
        let Some(product) = products.find_by_record_id(&product_id).await? else {
            tracing::debug!(
                target: "orders",
                product = %line.product_id,
                "Skipping cart line for missing product"
            );
            continue;
        };

        match products.try_decrement_stock(&product_id, line.quantity).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                release_stock(&products, &applied).await;
                return Err(AppError::validation(format!(
                    "Insufficient stock for {}",
                    product.name
                )));
            }
            Err(err) => {
                release_stock(&products, &applied).await;
                return Err(err.into());
            }
        }
        applied.push((product_id, line.quantity));

        total += line_total(product.price, line.quantity);
        order_items.push(OrderItem {
            product_id: line.product_id.clone(),
            product_name: product.name,
            quantity: line.quantity,
            price: product.price,
        });
    }

    let estimate = delivery_estimate(haversine_km(
        state.config.store_latitude,
        state.config.store_longitude,
        latitude,
        longitude,
    ));

    let now = Utc::now();
    let record = OrderRecord {
        id: None,
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        user_phone: user.phone.clone().unwrap_or_else(|| "N/A".to_string()),
        user_address: request.delivery_address.clone(),
        items: order_items,
        total_amount: to_f64(total),
        status: STATUS_PENDING.to_string(),
        delivery_agent_id: None,
        delivery_location: Some(DeliveryLocation {
            latitude,
            longitude,
        }),
        estimated_delivery_time: Some(estimate),
        created_at: now,
        updated_at: now,
    };

    let created = match orders.create(record).await {
        Ok(order) => order,
        Err(err) => {
            release_stock(&products, &applied).await;
            return Err(err.into());
        }
    };

    carts.clear(&user.id).await?;

    tracing::info!(
        target: "orders",
        order = ?created.id,
        total = created.total_amount,
        "Order placed"
    );
    Ok(created)
}

/// 回补已扣库存，单行失败记 warn 后继续
async fn release_stock(products: &ProductRepository, applied: &[(RecordId, i32)]) {
    for (product_id, quantity) in applied {
        if let Err(err) = products.restock(product_id, *quantity).await {
            tracing::warn!(
                target: "orders",
                product = %product_id,
                quantity = *quantity,
                error = %err,
                "Failed to release reserved stock"
            );
        }
    }
}
