//! Delivery Zone Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GeoJSON polygon geometry.
///
/// `coordinates` is a list of rings; the first ring is the outer boundary,
/// any further rings are holes. Every vertex is a `[longitude, latitude]`
/// pair and each ring closes on itself (first point == last point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl ZoneGeometry {
    /// Wrap a single outer ring as a GeoJSON Polygon
    pub fn polygon(outer_ring: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: vec![outer_ring],
        }
    }

    /// The outer boundary ring, if any
    pub fn outer_ring(&self) -> Option<&[[f64; 2]]> {
        self.coordinates.first().map(|r| r.as_slice())
    }
}

/// Legacy zone vertex, latitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Delivery zone in normalized (GeoJSON) form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: Option<String>,
    pub name: String,
    pub geometry: ZoneGeometry,
    pub assigned_agents: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn geometry_serializes_with_geojson_type_tag() {
        let geometry =
            ZoneGeometry::polygon(vec![[77.0, 13.0], [78.0, 13.0], [78.0, 14.0], [77.0, 13.0]]);

        let value = serde_json::to_value(&geometry).unwrap();
        assert_eq!(value["type"], "Polygon");
        assert_eq!(value["coordinates"][0][0], json!([77.0, 13.0]));

        let back: ZoneGeometry = serde_json::from_value(value).unwrap();
        assert_eq!(back, geometry);
    }

    #[test]
    fn outer_ring_is_the_first_ring() {
        let geometry = ZoneGeometry {
            kind: "Polygon".to_string(),
            coordinates: vec![
                vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]],
                vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]],
            ],
        };

        let outer = geometry.outer_ring().unwrap();
        assert_eq!(outer.len(), 4);
        assert_eq!(outer[1], [4.0, 0.0]);
    }

    #[test]
    fn empty_geometry_has_no_outer_ring() {
        let geometry = ZoneGeometry {
            kind: "Polygon".to_string(),
            coordinates: Vec::new(),
        };
        assert!(geometry.outer_ring().is_none());
    }
}
