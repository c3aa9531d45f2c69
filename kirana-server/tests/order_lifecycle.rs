//! 订单生命周期集成测试
//!
//! 覆盖：状态流转、配送员接单、按角色过滤的订单视图、营收统计。
//! Run: cargo test -p kirana-server --test order_lifecycle

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use shared::models::{
    OrderItem, STATUS_CONFIRMED, STATUS_DELIVERED, STATUS_PENDING, STATUS_PREPARING,
};

use kirana_server::db::models::OrderRecord;
use kirana_server::db::repository::OrderRepository;
use kirana_server::db::schema;

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path().join("db")).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    schema::initialize(&db).await.unwrap();
    (tmp, db)
}

fn order_for(user_id: &str, status: &str, total: f64) -> OrderRecord {
    let now = Utc::now();
    OrderRecord {
        id: None,
        user_id: user_id.to_string(),
        user_name: "Asha".to_string(),
        user_phone: "9876543210".to_string(),
        user_address: "12 MG Road".to_string(),
        items: vec![OrderItem {
            product_id: "products:rice".to_string(),
            product_name: "Basmati Rice".to_string(),
            quantity: 1,
            price: total,
        }],
        total_amount: total,
        status: status.to_string(),
        delivery_agent_id: None,
        delivery_location: None,
        estimated_delivery_time: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn accepting_binds_agent_and_moves_to_preparing() {
    let (_tmp, db) = test_db().await;
    let orders = OrderRepository::new(db.clone());

    let created = orders
        .create(order_for("users:asha", STATUS_CONFIRMED, 45.5))
        .await
        .unwrap();
    let order_id = created.id.unwrap().to_string();

    let updated = orders
        .assign_agent(&order_id, "users:agent1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, STATUS_PREPARING);
    assert_eq!(updated.delivery_agent_id.as_deref(), Some("users:agent1"));

    // 变更已持久化
    let reloaded = orders.find_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, STATUS_PREPARING);
    assert_eq!(reloaded.delivery_agent_id.as_deref(), Some("users:agent1"));
}

#[tokio::test]
async fn status_update_persists_and_touches_timestamp() {
    let (_tmp, db) = test_db().await;
    let orders = OrderRepository::new(db.clone());

    let created = orders
        .create(order_for("users:asha", STATUS_PENDING, 45.5))
        .await
        .unwrap();
    let order_id = created.id.unwrap().to_string();

    let updated = orders
        .set_status(&order_id, STATUS_CONFIRMED)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, STATUS_CONFIRMED);
    assert!(updated.updated_at >= created.created_at);
}

#[tokio::test]
async fn updates_on_missing_orders_return_none() {
    let (_tmp, db) = test_db().await;
    let orders = OrderRepository::new(db.clone());

    let status = orders
        .set_status("orders:doesnotexist", STATUS_CONFIRMED)
        .await
        .unwrap();
    assert!(status.is_none());

    let assigned = orders
        .assign_agent("orders:doesnotexist", "users:agent1")
        .await
        .unwrap();
    assert!(assigned.is_none());
}

#[tokio::test]
async fn listing_views_follow_roles() {
    let (_tmp, db) = test_db().await;
    let orders = OrderRepository::new(db.clone());

    // 顾客 A：一单 pending、一单 confirmed（可抢）
    orders
        .create(order_for("users:asha", STATUS_PENDING, 10.0))
        .await
        .unwrap();
    orders
        .create(order_for("users:asha", STATUS_CONFIRMED, 20.0))
        .await
        .unwrap();

    // 顾客 B 的订单已被 agent1 接走
    let taken = orders
        .create(order_for("users:ravi", STATUS_CONFIRMED, 30.0))
        .await
        .unwrap();
    orders
        .assign_agent(&taken.id.unwrap().to_string(), "users:agent1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(orders.list_all().await.unwrap().len(), 3);
    assert_eq!(orders.list_for_customer("users:asha").await.unwrap().len(), 2);
    assert_eq!(orders.list_for_customer("users:ravi").await.unwrap().len(), 1);

    // agent1：自己接的单 + 可抢的 confirmed 单
    let for_agent1 = orders.list_for_agent("users:agent1").await.unwrap();
    let mut totals: Vec<f64> = for_agent1.iter().map(|o| o.total_amount).collect();
    totals.sort_by(f64::total_cmp);
    assert_eq!(totals, vec![20.0, 30.0]);

    // 其他配送员只看到可抢的单
    let for_agent2 = orders.list_for_agent("users:agent2").await.unwrap();
    assert_eq!(for_agent2.len(), 1);
    assert_eq!(for_agent2[0].total_amount, 20.0);
}

#[tokio::test]
async fn revenue_counts_delivered_orders_only() {
    let (_tmp, db) = test_db().await;
    let orders = OrderRepository::new(db.clone());

    // 空表：计数与营收都为零
    assert_eq!(orders.count().await.unwrap(), 0);
    assert_eq!(orders.revenue_delivered().await.unwrap(), 0.0);

    orders
        .create(order_for("users:asha", STATUS_DELIVERED, 100.0))
        .await
        .unwrap();
    orders
        .create(order_for("users:ravi", STATUS_DELIVERED, 50.5))
        .await
        .unwrap();
    orders
        .create(order_for("users:asha", STATUS_PENDING, 999.0))
        .await
        .unwrap();

    assert_eq!(orders.count().await.unwrap(), 3);
    assert_eq!(orders.revenue_delivered().await.unwrap(), 150.5);
}
