//! 配送坐标提取
//!
//! 优先级：显式 `delivery_coordinates` 对象（两个字段齐全才算显式），
//! 其次地址文本中的 `lat,lng:` 标记。显式对象格式错误是硬错误，
//! 地址标记解析失败静默视为无坐标。

use serde_json::Value;

use shared::models::DeliveryCoordinates;

/// 地址文本中引入坐标的标记
pub const ADDRESS_MARKER: &str = "lat,lng:";

/// 坐标提取结果
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateExtraction {
    Found { latitude: f64, longitude: f64 },
    NotFound,
    /// 显式对象存在但字段非数值
    Invalid(String),
}

/// 从订单载荷提取配送坐标
pub fn extract_coordinates(
    explicit: Option<&DeliveryCoordinates>,
    address: &str,
) -> CoordinateExtraction {
    if let Some(coords) = explicit {
        // 两个字段都在才走显式路径，缺一个回退到地址标记
        if let (Some(lat), Some(lng)) = (&coords.latitude, &coords.longitude) {
            return match (numeric_value(lat), numeric_value(lng)) {
                (Some(latitude), Some(longitude)) => CoordinateExtraction::Found {
                    latitude,
                    longitude,
                },
                _ => CoordinateExtraction::Invalid(
                    "Invalid delivery coordinates format. \
                     Latitude and longitude must be numeric."
                        .to_string(),
                ),
            };
        }
    }

    match extract_from_address(address) {
        Some((latitude, longitude)) => CoordinateExtraction::Found {
            latitude,
            longitude,
        },
        None => CoordinateExtraction::NotFound,
    }
}

/// JSON 数值或数字字符串，其余类型不接受
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// 从地址文本解析 `"... lat,lng: <lat>, <lng>"`
///
/// 取第一个标记之后的部分，必须恰好是两个逗号分隔的数值，
/// 否则视为无坐标。
pub fn extract_from_address(address: &str) -> Option<(f64, f64)> {
    let (_, tail) = address.split_once(ADDRESS_MARKER)?;

    let parts: Vec<&str> = tail.trim().split(',').collect();
    if parts.len() != 2 {
        return None;
    }

    let latitude: f64 = parts[0].trim().parse().ok()?;
    let longitude: f64 = parts[1].trim().parse().ok()?;
    Some((latitude, longitude))
}
