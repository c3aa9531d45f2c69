//! 数据库记录模型
//!
//! 与 `shared::models` 中的 API DTO 区分：记录模型持有 `RecordId`，
//! API 层通过 `api::convert` 转换为字符串 ID 的 DTO。

pub mod cart;
pub mod order;
pub mod product;
pub mod user;
pub mod zone;

pub use cart::CartRecord;
pub use order::OrderRecord;
pub use product::ProductRecord;
pub use user::{UserCreate, UserRecord};
pub use zone::ZoneRecord;
