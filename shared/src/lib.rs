//! Shared types for the Kirana delivery platform
//!
//! API-facing data models exchanged between the server and its clients.
//! Storage-layer concerns (record ids, password hashes) stay on the server
//! side; everything here serializes to the wire format clients see.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
