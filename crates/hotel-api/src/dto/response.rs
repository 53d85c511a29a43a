//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hotel_service::account::LoginOutcome;

/// Plain confirmation message.
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

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Login response: profile plus the freshly issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_verified: bool,
    /// Access token, sent back in `X-Auth-Token`.
    pub token: String,
    pub refresh_token: String,
    /// Access token expiry.
    pub expires_at: DateTime<Utc>,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        let principal = outcome.principal;
        Self {
            id: principal.id,
            email: principal.email,
            first_name: principal.first_name,
            last_name: principal.last_name,
            role: principal.access_type.to_string(),
            is_verified: principal.is_verified,
            token: outcome.tokens.token,
            refresh_token: outcome.tokens.refresh_token,
            expires_at: outcome.tokens.expires_at,
        }
    }
}
