//! 认证模块：JWT 签发校验 + 请求中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUser, require_admin, require_auth, require_roles};
