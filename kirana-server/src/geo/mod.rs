//! 地理模块
//!
//! - [`polygon`]: 射线法点含测试
//! - [`normalize`]: 旧版 / GeoJSON 区域形态归一化与创建载荷解析
//! - [`resolver`]: 两级配送区域解析（原生查询 + 回退扫描）
//! - [`extract`]: 从订单载荷提取配送坐标
//! - [`distance`]: 大圆距离与配送时长估算

pub mod distance;
pub mod extract;
pub mod normalize;
pub mod polygon;
pub mod resolver;

pub use distance::{delivery_estimate, estimate_minutes, haversine_km};
pub use extract::{CoordinateExtraction, extract_coordinates, extract_from_address};
pub use normalize::{NewZone, close_ring, normalize_record, parse_zone_payload};
pub use polygon::point_in_ring;
pub use resolver::ZoneResolver;
