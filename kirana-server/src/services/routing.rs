//! OSRM 路线优化代理
//!
//! 把路点列表转成 OSRM `route/v1/driving` 请求，取第一条路线的
//! GeoJSON 几何并翻转为 `{latitude, longitude}` 返回。

use serde::Deserialize;

use shared::models::{RouteResponse, Waypoint};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

/// OSRM 路径段格式：`lng,lat;lng,lat;...`
fn format_waypoints(waypoints: &[Waypoint]) -> String {
    waypoints
        .iter()
        .map(|w| format!("{},{}", w.longitude, w.latitude))
        .collect::<Vec<_>>()
        .join(";")
}

/// 请求 OSRM 计算途经全部路点的驾车路线
pub async fn optimize_route(
    state: &ServerState,
    waypoints: &[Waypoint],
) -> AppResult<RouteResponse> {
    if waypoints.len() < 2 {
        return Err(AppError::validation(
            "At least two waypoints are required for routing.",
        ));
    }

    let url = format!(
        "{}/route/v1/driving/{}?geometries=geojson&overview=full",
        state.config.osrm_base_url.trim_end_matches('/'),
        format_waypoints(waypoints)
    );

    let response = state.http_client.get(&url).send().await.map_err(|err| {
        tracing::error!(target: "routing", error = %err, "Routing service unreachable");
        AppError::unavailable("Could not connect to routing service")
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            target: "routing",
            status = status.as_u16(),
            "Routing service returned an error"
        );
        return Err(AppError::upstream(
            status.as_u16(),
            format!("Routing service error: {body}"),
        ));
    }

    let payload: OsrmResponse = response
        .json()
        .await
        .map_err(|err| AppError::internal(format!("Invalid routing response: {err}")))?;

    let Some(route) = payload.routes.into_iter().next() else {
        return Err(AppError::not_found("No route found for the given waypoints."));
    };

    // GeoJSON [lng, lat] 翻转回 {latitude, longitude}
    let route = route
        .geometry
        .coordinates
        .into_iter()
        .map(|c| Waypoint {
            latitude: c[1],
            longitude: c[0],
        })
        .collect();

    Ok(RouteResponse { route })
}
