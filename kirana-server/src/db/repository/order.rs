//! 订单仓储

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{STATUS_CONFIRMED, STATUS_DELIVERED, STATUS_PREPARING};

use crate::db::models::OrderRecord;
use crate::db::repository::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};

pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, record: OrderRecord) -> RepoResult<OrderRecord> {
        let created: Option<OrderRecord> =
            self.base.db().create("orders").content(record).await?;

        created.ok_or_else(|| RepoError::Database("Order creation returned no record".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderRecord>> {
        let record_id = parse_record_id(id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    /// 管理员视角：全部订单
    pub async fn list_all(&self) -> RepoResult<Vec<OrderRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY created_at DESC")
            .await?;

        Ok(result.take(0)?)
    }

    /// 顾客视角：本人订单
    pub async fn list_for_customer(&self, user_id: &str) -> RepoResult<Vec<OrderRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE user_id = $user_id ORDER BY created_at DESC")
            .bind(("user_id", user_id.to_string()))
            .await?;

        Ok(result.take(0)?)
    }

    /// 配送员视角：自己接的单 + 可抢的已确认订单
    pub async fn list_for_agent(&self, agent_id: &str) -> RepoResult<Vec<OrderRecord>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM orders \
                 WHERE delivery_agent_id = $agent_id OR status = $status \
                 ORDER BY created_at DESC",
            )
            .bind(("agent_id", agent_id.to_string()))
            .bind(("status", STATUS_CONFIRMED))
            .await?;

        Ok(result.take(0)?)
    }

    pub async fn set_status(&self, id: &str, status: &str) -> RepoResult<Option<OrderRecord>> {
        let record_id = parse_record_id(id)?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $order SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("order", record_id))
            .bind(("status", status.to_string()))
            .bind(("now", Utc::now()))
            .await?;

        Ok(result.take(0)?)
    }

    /// 配送员接单：绑定配送员并置为备货中
    pub async fn assign_agent(
        &self,
        id: &str,
        agent_id: &str,
    ) -> RepoResult<Option<OrderRecord>> {
        let record_id = parse_record_id(id)?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET \
                    delivery_agent_id = $agent_id, \
                    status = $status, \
                    updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("order", record_id))
            .bind(("agent_id", agent_id.to_string()))
            .bind(("status", STATUS_PREPARING))
            .bind(("now", Utc::now()))
            .await?;

        Ok(result.take(0)?)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM orders GROUP ALL")
            .await?;

        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// 已送达订单的累计营收
    pub async fn revenue_delivered(&self) -> RepoResult<f64> {
        #[derive(serde::Deserialize)]
        struct SumRow {
            total: f64,
        }

        let mut result = self
            .base
            .db()
            .query(
                "SELECT math::sum(total_amount) AS total FROM orders \
                 WHERE status = $status GROUP ALL",
            )
            .bind(("status", STATUS_DELIVERED))
            .await?;

        let row: Option<SumRow> = result.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0.0))
    }
}
