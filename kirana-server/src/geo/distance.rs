//! 大圆距离与配送时长估算

use shared::models::DeliveryEstimate;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// 估算用的平均骑行速度 (km/h)
const DELIVERY_SPEED_KMH: f64 = 30.0;

/// 任何估算结果的下限（分钟）
const MIN_ESTIMATE_MINUTES: i64 = 5;

/// Haversine 大圆距离（公里）
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// 距离转配送分钟数，非正距离直接给下限
pub fn estimate_minutes(distance_km: f64) -> i64 {
    if distance_km <= 0.0 {
        return MIN_ESTIMATE_MINUTES;
    }

    let minutes = (distance_km / DELIVERY_SPEED_KMH * 60.0).round() as i64;
    minutes.max(MIN_ESTIMATE_MINUTES)
}

/// 订单上存储的配送时长估算
pub fn delivery_estimate(distance_km: f64) -> DeliveryEstimate {
    let minutes = estimate_minutes(distance_km);
    DeliveryEstimate {
        minutes,
        formatted: format!("{minutes} mins"),
    }
}
