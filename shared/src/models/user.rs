//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer role (default for new registrations)
pub const ROLE_CUSTOMER: &str = "customer";
/// Delivery agent role
pub const ROLE_DELIVERY_AGENT: &str = "delivery_agent";
/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

/// User profile as exposed by the API (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Zone the user covers (delivery agents only)
    pub delivery_zone_id: Option<String>,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token envelope returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: UserProfile) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}
