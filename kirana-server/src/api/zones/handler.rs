//! 配送区域处理器

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use shared::models::{DeliveryZone, MessageResponse, ROLE_DELIVERY_AGENT};

use crate::core::ServerState;
use crate::db::repository::{UserRepository, ZoneRepository};
use crate::geo::{normalize_record, parse_zone_payload};
use crate::utils::{AppError, AppResult};

/// GET /api/delivery-zones - 归一化后的全部区域
///
/// 两种存量形态统一成 GeoJSON 返回，无法归一化的记录跳过。
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DeliveryZone>>> {
    let records = ZoneRepository::new(state.db.clone()).find_all().await?;

    Ok(Json(
        records.into_iter().filter_map(normalize_record).collect(),
    ))
}

/// POST /api/delivery-zones - 新建区域（管理员）
///
/// 接受标准形态或 GeoJSON FeatureCollection，入库前统一归一化。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<DeliveryZone>> {
    let new_zone = parse_zone_payload(&payload)?;

    let record = ZoneRepository::new(state.db.clone())
        .create_normalized(new_zone.name, new_zone.geometry)
        .await?;

    normalize_record(record)
        .map(Json)
        .ok_or_else(|| AppError::internal("Stored zone is missing geometry"))
}

#[derive(Debug, Deserialize)]
pub struct AssignAgentQuery {
    pub agent_id: String,
}

/// PUT /api/delivery-zones/{id}/assign-agent?agent_id=... （管理员）
///
/// 区域侧与用户侧双向绑定。
pub async fn assign_agent(
    State(state): State<ServerState>,
    Path(zone_id): Path<String>,
    Query(query): Query<AssignAgentQuery>,
) -> AppResult<Json<MessageResponse>> {
    let zones = ZoneRepository::new(state.db.clone());
    let users = UserRepository::new(state.db.clone());

    if zones.find_by_id(&zone_id).await?.is_none() {
        return Err(AppError::not_found("Delivery zone not found"));
    }

    let agent_found = users
        .find_by_id(&query.agent_id)
        .await?
        .is_some_and(|user| user.role == ROLE_DELIVERY_AGENT);
    if !agent_found {
        return Err(AppError::not_found("Delivery agent not found"));
    }

    zones.add_agent(&zone_id, &query.agent_id).await?;
    users.set_delivery_zone(&query.agent_id, &zone_id).await?;

    Ok(Json(MessageResponse::new("Agent assigned to zone")))
}
