//! 表结构初始化
//!
//! 所有语句幂等（IF NOT EXISTS），每次启动执行。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// 建表语句
///
/// `delivery_zones.geometry` 定义为 `option<geometry<polygon>>`：
/// - 写入 GeoJSON 形态的对象时自动转为原生几何值，`INTERSECTS` 查询可用
/// - 旧版数据只有 `coordinates` 字段、没有 geometry，原生查询天然不命中，
///   由应用层回退扫描覆盖
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS users SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS users_email_idx ON users FIELDS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS products SCHEMALESS;

    DEFINE TABLE IF NOT EXISTS carts SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS carts_user_idx ON carts FIELDS user_id UNIQUE;

    DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;

    DEFINE TABLE IF NOT EXISTS delivery_zones SCHEMALESS;
    DEFINE FIELD IF NOT EXISTS geometry ON delivery_zones TYPE option<geometry<polygon>>;
";

/// 执行表结构初始化
pub async fn initialize(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query(SCHEMA).await?.check()?;
    tracing::debug!("Database schema initialized");
    Ok(())
}
