//! 商品仓储

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use shared::models::ProductCreate;

use crate::db::models::ProductRecord;
use crate::db::repository::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};

pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<ProductRecord> {
        let created: Option<ProductRecord> = self
            .base
            .db()
            .create("products")
            .content(ProductRecord::from_create(data))
            .await?;

        created.ok_or_else(|| RepoError::Database("Product creation returned no record".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProductRecord>> {
        let record_id = parse_record_id(id)?;
        self.find_by_record_id(&record_id).await
    }

    pub async fn find_by_record_id(&self, id: &RecordId) -> RepoResult<Option<ProductRecord>> {
        Ok(self.base.db().select(id.clone()).await?)
    }

    /// 分页查询，返回（过滤后的总数，当前页记录）
    pub async fn find_page(
        &self,
        category: Option<&str>,
        page: i64,
        limit: i64,
    ) -> RepoResult<(i64, Vec<ProductRecord>)> {
        let start = (page - 1) * limit;

        let (count_sql, list_sql) = if category.is_some() {
            (
                "SELECT count() AS count FROM products WHERE category = $category GROUP ALL",
                "SELECT * FROM products WHERE category = $category ORDER BY name LIMIT $limit START $start",
            )
        } else {
            (
                "SELECT count() AS count FROM products GROUP ALL",
                "SELECT * FROM products ORDER BY name LIMIT $limit START $start",
            )
        };

        let mut query = self
            .base
            .db()
            .query(count_sql)
            .query(list_sql)
            .bind(("limit", limit))
            .bind(("start", start));
        if let Some(category) = category {
            query = query.bind(("category", category.to_string()));
        }

        let mut result = query.await?;
        let total: Option<CountRow> = result.take(0)?;
        let products: Vec<ProductRecord> = result.take(1)?;

        Ok((total.map(|r| r.count).unwrap_or(0), products))
    }

    /// 去重后的商品分类列表
    pub async fn categories(&self) -> RepoResult<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct CategoryRow {
            category: String,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT category FROM products GROUP BY category")
            .await?;

        let rows: Vec<CategoryRow> = result.take(0)?;
        Ok(rows.into_iter().map(|r| r.category).collect())
    }

    /// 整体替换商品字段，保留 created_at；记录不存在返回 None
    pub async fn replace(
        &self,
        id: &str,
        data: ProductCreate,
    ) -> RepoResult<Option<ProductRecord>> {
        let record_id = parse_record_id(id)?;
        Ok(self.base.db().update(record_id).merge(data).await?)
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let record_id = parse_record_id(id)?;
        let deleted: Option<ProductRecord> = self.base.db().delete(record_id).await?;
        Ok(deleted.is_some())
    }

    /// 条件扣减库存：仅当余量充足时扣减并返回更新后的记录
    ///
    /// 余量不足时条件不满足，返回 None，记录保持不变。
    pub async fn try_decrement_stock(
        &self,
        id: &RecordId,
        quantity: i32,
    ) -> RepoResult<Option<ProductRecord>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $product SET stock -= $quantity WHERE stock >= $quantity RETURN AFTER")
            .bind(("product", id.clone()))
            .bind(("quantity", quantity))
            .await?;

        Ok(result.take(0)?)
    }

    /// 回补库存（结算中途失败的补偿动作）
    pub async fn restock(&self, id: &RecordId, quantity: i32) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $product SET stock += $quantity")
            .bind(("product", id.clone()))
            .bind(("quantity", quantity))
            .await?
            .check()?;

        Ok(())
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM products GROUP ALL")
            .await?;

        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
