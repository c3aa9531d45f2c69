//! 区域形态归一化
//!
//! 存量数据存在两代形态（旧版 `{lat, lng}` 顶点数组 / GeoJSON Polygon），
//! 全部读取路径都先经 [`normalize_record`] 收敛到 GeoJSON 形态再使用。
//! 区域创建载荷的解析（标准形态 / FeatureCollection）也在这里。

use chrono::Utc;
use serde_json::Value;

use shared::models::{DeliveryZone, LegacyPoint, ZoneGeometry};

use crate::db::models::ZoneRecord;
use crate::utils::AppError;

/// 闭合环：首尾顶点不同时追加首顶点
pub fn close_ring(mut ring: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}

/// 旧版顶点数组转 GeoJSON Polygon
///
/// `{lat, lng}` 映射为 `[lng, lat]`，环自动闭合。
pub fn legacy_to_geometry(points: &[LegacyPoint]) -> ZoneGeometry {
    let ring: Vec<[f64; 2]> = points.iter().map(|p| [p.lng, p.lat]).collect();
    ZoneGeometry::polygon(close_ring(ring))
}

/// 存储记录归一化为对外的区域形态
///
/// - 已有 geometry：原样保留（不重复闭合）
/// - 仅有旧版 coordinates：转换为闭合 Polygon
/// - 两者皆无：记一条 warn 并跳过该记录
pub fn normalize_record(record: ZoneRecord) -> Option<DeliveryZone> {
    let id = record.id.as_ref().map(|record_id| record_id.to_string());

    let geometry = match (record.geometry, record.coordinates) {
        (Some(geometry), _) => geometry,
        (None, Some(points)) => legacy_to_geometry(&points),
        (None, None) => {
            tracing::warn!(
                target: "zones",
                zone = %record.name,
                id = ?id,
                "Zone record has neither geometry nor coordinates, skipping"
            );
            return None;
        }
    };

    Some(DeliveryZone {
        id,
        name: record.name,
        geometry,
        assigned_agents: record.assigned_agents,
        created_at: record.created_at,
    })
}

/// 校验通过的区域创建数据
#[derive(Debug, Clone)]
pub struct NewZone {
    pub name: String,
    pub geometry: ZoneGeometry,
}

/// 解析区域创建载荷
///
/// 按顶层 `type` 字段区分两种形态：
/// - GeoJSON `FeatureCollection`：取第一个 feature 的 Polygon，
///   名称取 `properties.name`，缺省时生成
/// - 标准形态：`{ "name": ..., "geometry": { Polygon } }`
///
/// 两种形态共用同一套 Polygon 校验，外环写入前闭合。
pub fn parse_zone_payload(payload: &Value) -> Result<NewZone, AppError> {
    if payload.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
        return parse_feature_collection(payload);
    }

    if let (Some(name), Some(geometry)) = (payload.get("name"), payload.get("geometry")) {
        return parse_standard(name, geometry);
    }

    Err(AppError::validation(
        "Zone must be either standard format or GeoJSON FeatureCollection",
    ))
}

fn parse_feature_collection(payload: &Value) -> Result<NewZone, AppError> {
    let features = payload
        .get("features")
        .and_then(Value::as_array)
        .filter(|features| !features.is_empty())
        .ok_or_else(|| AppError::validation("GeoJSON FeatureCollection contains no features"))?;

    let feature = &features[0];
    let geometry = parse_polygon(feature.get("geometry"))?;

    let name = feature
        .pointer("/properties/name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Zone {}", Utc::now().format("%Y%m%d%H%M%S")));

    Ok(NewZone {
        name,
        geometry: close_outer_ring(geometry),
    })
}

fn parse_standard(name: &Value, geometry: &Value) -> Result<NewZone, AppError> {
    let name = name
        .as_str()
        .ok_or_else(|| AppError::validation("Zone name must be a string"))?
        .to_string();

    let geometry = parse_polygon(Some(geometry))?;

    Ok(NewZone {
        name,
        geometry: close_outer_ring(geometry),
    })
}

/// 解析并校验 Polygon 几何
fn parse_polygon(value: Option<&Value>) -> Result<ZoneGeometry, AppError> {
    let value = value
        .cloned()
        .ok_or_else(|| AppError::validation("Zone geometry is required"))?;

    let geometry: ZoneGeometry = serde_json::from_value(value)
        .map_err(|_| AppError::validation("Zone geometry is not a valid Polygon"))?;

    if geometry.kind != "Polygon" {
        return Err(AppError::validation("Zone geometry must be a Polygon"));
    }

    let Some(outer) = geometry.outer_ring() else {
        return Err(AppError::validation("Zone polygon has no rings"));
    };

    // 闭合重复顶点不计入
    let mut distinct: Vec<[f64; 2]> = Vec::new();
    for vertex in outer {
        if !distinct.contains(vertex) {
            distinct.push(*vertex);
        }
    }
    if distinct.len() < 3 {
        return Err(AppError::validation(
            "Zone polygon needs at least 3 distinct vertices",
        ));
    }

    Ok(geometry)
}

/// 闭合外环，内环（孔洞）原样保留
fn close_outer_ring(mut geometry: ZoneGeometry) -> ZoneGeometry {
    if let Some(outer) = geometry.coordinates.first_mut() {
        *outer = close_ring(std::mem::take(outer));
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(
        coordinates: Option<Vec<LegacyPoint>>,
        geometry: Option<ZoneGeometry>,
    ) -> ZoneRecord {
        ZoneRecord {
            id: None,
            name: "Test Zone".to_string(),
            coordinates,
            geometry,
            assigned_agents: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn legacy_vertices_become_closed_geojson_ring() {
        let points = vec![
            LegacyPoint { lat: 13.1056, lng: 77.5951 },
            LegacyPoint { lat: 13.0993, lng: 77.5849 },
            LegacyPoint { lat: 13.0897, lng: 77.6007 },
        ];

        let zone = normalize_record(record(Some(points), None)).unwrap();
        let ring = zone.geometry.outer_ring().unwrap();

        assert_eq!(zone.geometry.kind, "Polygon");
        // [lat, lng] -> [lng, lat], plus the closing vertex
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], [77.5951, 13.1056]);
        assert_eq!(ring[1], [77.5849, 13.0993]);
        assert_eq!(ring[0], ring[3]);
    }

    #[test]
    fn existing_geometry_passes_through_unchanged() {
        let geometry = ZoneGeometry::polygon(vec![
            [77.0, 13.0],
            [78.0, 13.0],
            [78.0, 14.0],
            [77.0, 13.0],
        ]);

        let zone = normalize_record(record(None, Some(geometry.clone()))).unwrap();
        assert_eq!(zone.geometry.coordinates, geometry.coordinates);
    }

    #[test]
    fn geometry_wins_when_both_forms_are_present() {
        let geometry = ZoneGeometry::polygon(vec![
            [77.0, 13.0],
            [78.0, 13.0],
            [78.0, 14.0],
            [77.0, 13.0],
        ]);
        let points = vec![LegacyPoint { lat: 1.0, lng: 2.0 }];

        let zone = normalize_record(record(Some(points), Some(geometry.clone()))).unwrap();
        assert_eq!(zone.geometry.coordinates, geometry.coordinates);
    }

    #[test]
    fn record_without_any_form_is_skipped() {
        assert!(normalize_record(record(None, None)).is_none());
    }

    #[test]
    fn close_ring_is_idempotent() {
        let open = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let closed = close_ring(open);
        assert_eq!(closed.len(), 4);
        assert_eq!(close_ring(closed.clone()), closed);
    }

    #[test]
    fn standard_payload_is_accepted_and_closed() {
        let payload = json!({
            "name": "North Zone",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[77.0, 13.0], [78.0, 13.0], [78.0, 14.0]]]
            }
        });

        let zone = parse_zone_payload(&payload).unwrap();
        assert_eq!(zone.name, "North Zone");
        let ring = zone.geometry.outer_ring().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
    }

    #[test]
    fn feature_collection_takes_first_feature() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "name": "Drawn Zone" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[77.0, 13.0], [78.0, 13.0], [78.0, 14.0], [77.0, 13.0]]]
                }
            }]
        });

        let zone = parse_zone_payload(&payload).unwrap();
        assert_eq!(zone.name, "Drawn Zone");
        assert_eq!(zone.geometry.kind, "Polygon");
    }

    #[test]
    fn feature_collection_without_name_gets_a_generated_one() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[77.0, 13.0], [78.0, 13.0], [78.0, 14.0], [77.0, 13.0]]]
                }
            }]
        });

        let zone = parse_zone_payload(&payload).unwrap();
        assert!(zone.name.starts_with("Zone "));
    }

    #[test]
    fn empty_feature_collection_is_rejected() {
        let payload = json!({ "type": "FeatureCollection", "features": [] });
        assert!(parse_zone_payload(&payload).is_err());
    }

    #[test]
    fn non_polygon_geometry_is_rejected() {
        let payload = json!({
            "name": "Bad",
            "geometry": { "type": "LineString", "coordinates": [[77.0, 13.0], [78.0, 13.0]] }
        });
        assert!(parse_zone_payload(&payload).is_err());

        let payload = json!({
            "type": "FeatureCollection",
            "features": [{
                "geometry": { "type": "Point", "coordinates": [77.0, 13.0] }
            }]
        });
        assert!(parse_zone_payload(&payload).is_err());
    }

    #[test]
    fn too_few_distinct_vertices_is_rejected() {
        // 3 vertices but only 2 distinct once the closing duplicate is ignored
        let payload = json!({
            "name": "Sliver",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[77.0, 13.0], [78.0, 13.0], [77.0, 13.0]]]
            }
        });
        assert!(parse_zone_payload(&payload).is_err());
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let payload = json!({ "zone": "what" });
        let err = parse_zone_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("standard format"));
    }
}
