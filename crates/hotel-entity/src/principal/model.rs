//! Principal entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::access::AccessType;

/// The login-relevant projection of any principal row.
///
/// Repositories select `<kind>_id AS id` so one struct covers every table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Principal {
    /// Identifier within the kind's table.
    pub id: Uuid,
    /// Kind of principal.
    pub access_type: AccessType,
    /// Login email, unique per kind.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Most recently issued access token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Most recently issued refresh token.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// Email confirmed. Always true for staff.
    pub is_verified: bool,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
    /// When the principal was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Reference used to address this principal's row.
    pub fn reference(&self) -> PrincipalRef {
        PrincipalRef::new(self.access_type, self.id)
    }
}

/// Addresses one principal row: the kind picks the table and id column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalRef {
    /// Kind of principal.
    pub kind: AccessType,
    /// Identifier within the kind's table.
    pub id: Uuid,
}

impl PrincipalRef {
    /// Build a reference.
    pub fn new(kind: AccessType, id: Uuid) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for PrincipalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind.id_column(), self.id)
    }
}

/// Data required to create a staff principal (admin, manager, driver).
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    /// Kind of principal. Guests are created through [`crate::guest::NewGuest`].
    pub access_type: AccessType,
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
