//! Data models
//!
//! Shared between kirana-server and clients (via API).
//! All IDs are opaque `String`s in the "table:key" form the server emits.

pub mod cart;
pub mod message;
pub mod order;
pub mod product;
pub mod route;
pub mod stats;
pub mod user;
pub mod zone;

// Re-exports
pub use cart::*;
pub use message::*;
pub use order::*;
pub use product::*;
pub use route::*;
pub use stats::*;
pub use user::*;
pub use zone::*;
