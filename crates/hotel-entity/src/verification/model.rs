//! Email verification record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A pending email verification. At most one exists per guest; it is
/// deleted when the guest confirms the link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailVerification {
    /// Unique record identifier.
    pub verification_id: Uuid,
    /// Guest being verified.
    pub guest_id: Uuid,
    /// Raw secret; the link carries only its SHA-256.
    #[serde(skip_serializing)]
    pub token: String,
    /// Unix seconds after which the link is dead.
    pub expires_at: i64,
    /// When the record was issued.
    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    /// Builds a fresh record.
    pub fn new(guest_id: Uuid, token: String, expires_at: i64) -> Self {
        Self {
            verification_id: Uuid::new_v4(),
            guest_id,
            token,
            expires_at,
            created_at: Utc::now(),
        }
    }
}
