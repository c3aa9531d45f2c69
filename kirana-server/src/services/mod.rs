//! 业务服务层：跨仓储的流程编排

pub mod checkout;
pub mod money;
pub mod routing;

pub use checkout::place_order;
pub use routing::optimize_route;
