//! Plain acknowledgement responses.

use serde::{Deserialize, Serialize};

/// `{ "message": "..." }` body used by mutation endpoints that have no
/// richer payload to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
