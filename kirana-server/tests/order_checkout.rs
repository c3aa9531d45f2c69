//! 下单结算集成测试
//!
//! 覆盖：坐标提取、区域校验、条件扣库存与失败回补、
//! 购物车清空、配送时长估算。
//! Run: cargo test -p kirana-server --test order_checkout

use std::sync::Arc;

use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use shared::models::{
    DeliveryCoordinates, OrderCreateRequest, ProductCreate, ROLE_CUSTOMER, STATUS_PENDING,
    ZoneGeometry,
};

use kirana_server::auth::{CurrentUser, JwtService};
use kirana_server::db::repository::{
    CartRepository, OrderRepository, ProductRepository, ZoneRepository,
};
use kirana_server::db::schema;
use kirana_server::services::place_order;
use kirana_server::utils::AppError;
use kirana_server::{Config, ServerState};

/// 门店默认坐标 (12.9716, 77.5946)，该地址到店距离对应 28 分钟估算
const IN_ZONE_ADDRESS: &str = "12 MG Road, Shanthi Nagar lat,lng: 13.0997, 77.5975";

async fn test_state() -> (tempfile::TempDir, ServerState) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path().join("db")).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    schema::initialize(&db).await.unwrap();

    let config = Config::with_overrides(tmp.path().display().to_string(), 0);
    let state = ServerState::new(config, db, Arc::new(JwtService::new()));
    (tmp, state)
}

/// 北 Bangalore 四边形区域
async fn seed_zone(state: &ServerState) {
    let ring = vec![
        [77.5951, 13.1056],
        [77.5849, 13.0993],
        [77.6007, 13.0897],
        [77.6094, 13.1040],
        [77.5951, 13.1056],
    ];

    ZoneRepository::new(state.db.clone())
        .create_normalized("North Bangalore".to_string(), ZoneGeometry::polygon(ring))
        .await
        .unwrap();
}

async fn seed_product(state: &ServerState, name: &str, price: f64, stock: i32) -> String {
    let record = ProductRepository::new(state.db.clone())
        .create(ProductCreate {
            name: name.to_string(),
            brand: "Kirana".to_string(),
            description: format!("{name} test item"),
            price,
            category: "staples".to_string(),
            stock,
            unit: "kg".to_string(),
            variant: "1kg".to_string(),
            code: None,
            barcode: None,
            image: String::new(),
        })
        .await
        .unwrap();

    record.id.unwrap().to_string()
}

fn customer(id: &str) -> CurrentUser {
    CurrentUser {
        id: format!("users:{id}"),
        email: format!("{id}@example.com"),
        name: "Asha".to_string(),
        role: ROLE_CUSTOMER.to_string(),
        phone: Some("9876543210".to_string()),
        address: None,
        delivery_zone_id: None,
    }
}

fn checkout(address: &str) -> OrderCreateRequest {
    OrderCreateRequest {
        items: Vec::new(),
        delivery_address: address.to_string(),
        delivery_coordinates: None,
    }
}

async fn stock_of(state: &ServerState, product_id: &str) -> i32 {
    ProductRepository::new(state.db.clone())
        .find_by_id(product_id)
        .await
        .unwrap()
        .unwrap()
        .stock
}

#[tokio::test]
async fn rejects_checkout_with_empty_cart() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let err = place_order(&state, &user, checkout(IN_ZONE_ADDRESS))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    assert_eq!(err.to_string(), "Cart is empty");
    assert_eq!(OrderRepository::new(state.db.clone()).count().await.unwrap(), 0);
}

#[tokio::test]
async fn rejects_address_without_coordinates() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;
    CartRepository::new(state.db.clone())
        .add_item(&user.id, &rice, 2)
        .await
        .unwrap();

    let err = place_order(&state, &user, checkout("12 MG Road, no marker here"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    assert!(err.to_string().contains("Could not extract coordinates"));

    // 坐标校验发生在扣库存之前
    assert_eq!(stock_of(&state, &rice).await, 10);
    assert_eq!(OrderRepository::new(state.db.clone()).count().await.unwrap(), 0);
}

#[tokio::test]
async fn rejects_location_outside_all_zones() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;
    CartRepository::new(state.db.clone())
        .add_item(&user.id, &rice, 2)
        .await
        .unwrap();

    let err = place_order(&state, &user, checkout("Far away lat,lng: 12.0, 77.0"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("outside all delivery zones"), "got {err}");
    assert_eq!(stock_of(&state, &rice).await, 10);
}

#[tokio::test]
async fn places_order_from_address_marker() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;
    let dal = seed_product(&state, "Toor Dal", 30.0, 5).await;

    let carts = CartRepository::new(state.db.clone());
    carts.add_item(&user.id, &rice, 2).await.unwrap();
    carts.add_item(&user.id, &dal, 1).await.unwrap();

    let order = place_order(&state, &user, checkout(IN_ZONE_ADDRESS))
        .await
        .unwrap();

    assert_eq!(order.status, STATUS_PENDING);
    assert_eq!(order.user_id, user.id);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total_amount, 121.0);

    let location = order.delivery_location.unwrap();
    assert_eq!(location.latitude, 13.0997);
    assert_eq!(location.longitude, 77.5975);

    let estimate = order.estimated_delivery_time.unwrap();
    assert_eq!(estimate.minutes, 28);
    assert_eq!(estimate.formatted, "28 mins");

    // 库存扣减、购物车清空
    assert_eq!(stock_of(&state, &rice).await, 8);
    assert_eq!(stock_of(&state, &dal).await, 4);

    let cart = carts.find_by_user(&user.id).await.unwrap().unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn explicit_coordinates_override_address_marker() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;
    CartRepository::new(state.db.clone())
        .add_item(&user.id, &rice, 1)
        .await
        .unwrap();

    // 地址标记在区域外；显式坐标（数字字符串形式）在区域内。
    // 显式坐标胜出，否则这一单会因区域校验失败。
    let request = OrderCreateRequest {
        items: Vec::new(),
        delivery_address: "Far away lat,lng: 12.0, 77.0".to_string(),
        delivery_coordinates: Some(DeliveryCoordinates {
            latitude: Some(json!("13.0997")),
            longitude: Some(json!(77.5975)),
        }),
    };

    let order = place_order(&state, &user, request).await.unwrap();

    let location = order.delivery_location.unwrap();
    assert_eq!(location.latitude, 13.0997);
    assert_eq!(location.longitude, 77.5975);
}

#[tokio::test]
async fn rejects_non_numeric_explicit_coordinates() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;
    CartRepository::new(state.db.clone())
        .add_item(&user.id, &rice, 1)
        .await
        .unwrap();

    let request = OrderCreateRequest {
        items: Vec::new(),
        delivery_address: IN_ZONE_ADDRESS.to_string(),
        delivery_coordinates: Some(DeliveryCoordinates {
            latitude: Some(json!(true)),
            longitude: Some(json!(77.5975)),
        }),
    };

    let err = place_order(&state, &user, request).await.unwrap_err();

    assert!(err.to_string().contains("must be numeric"), "got {err}");
    assert_eq!(stock_of(&state, &rice).await, 10);
}

#[tokio::test]
async fn insufficient_stock_rolls_back_earlier_lines() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;
    let milk = seed_product(&state, "Milk", 25.0, 1).await;

    let carts = CartRepository::new(state.db.clone());
    carts.add_item(&user.id, &rice, 2).await.unwrap();
    carts.add_item(&user.id, &milk, 3).await.unwrap();

    let err = place_order(&state, &user, checkout(IN_ZONE_ADDRESS))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Insufficient stock for Milk");

    // 第一行已扣的库存被回补，第二行从未扣成功
    assert_eq!(stock_of(&state, &rice).await, 10);
    assert_eq!(stock_of(&state, &milk).await, 1);

    // 不落订单，购物车保持原样
    assert_eq!(OrderRepository::new(state.db.clone()).count().await.unwrap(), 0);
    let cart = carts.find_by_user(&user.id).await.unwrap().unwrap();
    assert_eq!(cart.items.len(), 2);
}

#[tokio::test]
async fn sequential_checkouts_deplete_stock() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;

    // 最后一件：先到先得
    let milk = seed_product(&state, "Milk", 25.0, 1).await;
    let carts = CartRepository::new(state.db.clone());

    let first = customer("asha");
    carts.add_item(&first.id, &milk, 1).await.unwrap();
    place_order(&state, &first, checkout(IN_ZONE_ADDRESS))
        .await
        .unwrap();
    assert_eq!(stock_of(&state, &milk).await, 0);

    let second = customer("ravi");
    carts.add_item(&second.id, &milk, 1).await.unwrap();
    let err = place_order(&state, &second, checkout(IN_ZONE_ADDRESS))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Insufficient stock for Milk");
    assert_eq!(stock_of(&state, &milk).await, 0);
    assert_eq!(OrderRepository::new(state.db.clone()).count().await.unwrap(), 1);
}

#[tokio::test]
async fn vanished_products_are_skipped() {
    let (_tmp, state) = test_state().await;
    seed_zone(&state).await;
    let user = customer("asha");

    let rice = seed_product(&state, "Basmati Rice", 45.5, 10).await;

    let carts = CartRepository::new(state.db.clone());
    carts.add_item(&user.id, &rice, 1).await.unwrap();
    // 商品已下架（记录不存在）与 ID 损坏的两种残留行
    carts.add_item(&user.id, "products:ghost", 2).await.unwrap();
    carts.add_item(&user.id, "not-a-record-id", 2).await.unwrap();

    let order = place_order(&state, &user, checkout(IN_ZONE_ADDRESS))
        .await
        .unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_name, "Basmati Rice");
    assert_eq!(order.total_amount, 45.5);
}
