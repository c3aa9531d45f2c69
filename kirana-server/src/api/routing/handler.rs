//! 路线优化处理器

use axum::Json;
use axum::extract::State;

use shared::models::{RouteResponse, Waypoint};

use crate::core::ServerState;
use crate::services;
use crate::utils::AppResult;

/// POST /api/route/optimize - 途经全部路点的驾车路线
///
/// 请求体为路点数组，响应为 OSRM 路线几何翻转成的路点序列。
pub async fn optimize(
    State(state): State<ServerState>,
    Json(waypoints): Json<Vec<Waypoint>>,
) -> AppResult<Json<RouteResponse>> {
    let route = services::routing::optimize_route(&state, &waypoints).await?;
    Ok(Json(route))
}
