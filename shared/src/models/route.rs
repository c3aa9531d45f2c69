//! Route Optimization Model

use serde::{Deserialize, Serialize};

/// A stop on a delivery run, latitude first (client convention)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Optimized route polyline as a list of waypoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: Vec<Waypoint>,
}
