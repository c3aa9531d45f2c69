//! 购物车仓储
//!
//! 购物车按用户惰性创建，行内合并、改量、移除都是
//! 读改写整条 items 数组（购物车行数很小）。

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::CartItem;

use crate::db::models::CartRecord;
use crate::db::repository::{BaseRepository, RepoError, RepoResult};

pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Option<CartRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM carts WHERE user_id = $user_id LIMIT 1")
            .bind(("user_id", user_id.to_string()))
            .await?;

        Ok(result.take(0)?)
    }

    pub async fn get_or_create(&self, user_id: &str) -> RepoResult<CartRecord> {
        if let Some(cart) = self.find_by_user(user_id).await? {
            return Ok(cart);
        }

        let created: Option<CartRecord> = self
            .base
            .db()
            .create("carts")
            .content(CartRecord {
                id: None,
                user_id: user_id.to_string(),
                items: Vec::new(),
                updated_at: Utc::now(),
            })
            .await?;

        created.ok_or_else(|| RepoError::Database("Cart creation returned no record".to_string()))
    }

    /// 加购：已有同商品行时合并数量，否则追加新行
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> RepoResult<CartRecord> {
        let mut cart = self.get_or_create(user_id).await?;

        match cart
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => line.quantity += quantity,
            None => cart.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }

        self.save_items(cart).await
    }

    /// 改量：购物车或商品行不存在时静默跳过
    pub async fn set_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> RepoResult<()> {
        let Some(mut cart) = self.find_by_user(user_id).await? else {
            return Ok(());
        };

        if let Some(line) = cart
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity;
            self.save_items(cart).await?;
        }

        Ok(())
    }

    pub async fn remove_item(&self, user_id: &str, product_id: &str) -> RepoResult<()> {
        if let Some(mut cart) = self.find_by_user(user_id).await? {
            cart.items.retain(|line| line.product_id != product_id);
            self.save_items(cart).await?;
        }

        Ok(())
    }

    pub async fn clear(&self, user_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE carts SET items = [], updated_at = $now WHERE user_id = $user_id")
            .bind(("now", Utc::now()))
            .bind(("user_id", user_id.to_string()))
            .await?
            .check()?;

        Ok(())
    }

    async fn save_items(&self, cart: CartRecord) -> RepoResult<CartRecord> {
        let Some(id) = cart.id.clone() else {
            return Err(RepoError::Database("Cart record missing ID".to_string()));
        };

        let mut result = self
            .base
            .db()
            .query("UPDATE $cart SET items = $items, updated_at = $now RETURN AFTER")
            .bind(("cart", id))
            .bind(("items", cart.items))
            .bind(("now", Utc::now()))
            .await?;

        result
            .take::<Option<CartRecord>>(0)?
            .ok_or_else(|| RepoError::Database("Cart update returned no record".to_string()))
    }
}
