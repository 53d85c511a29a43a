//! Guest entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::id_proof::IdProofType;
use crate::principal::{AccessType, Principal};

/// A registered guest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guest {
    /// Unique guest identifier.
    pub guest_id: Uuid,
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Gender, free text.
    pub gender: Option<String>,
    /// Country of residence.
    pub country: Option<String>,
    /// Identity document kind.
    pub id_proof_type: Option<IdProofType>,
    /// Whether the email address has been confirmed.
    pub is_verified: bool,
    /// Most recently issued access token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Most recently issued refresh token.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// When the guest signed up.
    pub created_at: DateTime<Utc>,
    /// When the guest was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    /// Builds a fresh, unverified guest from signup data.
    pub fn from_new(new: NewGuest) -> Self {
        let now = Utc::now();
        Self {
            guest_id: Uuid::new_v4(),
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            password_hash: new.password_hash,
            phone: new.phone,
            gender: new.gender,
            country: new.country,
            id_proof_type: new.id_proof_type,
            is_verified: false,
            token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Login projection of this guest.
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.guest_id,
            access_type: AccessType::Guest,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            password_hash: self.password_hash.clone(),
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Data collected at guest signup.
#[derive(Debug, Clone)]
pub struct NewGuest {
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Country of residence.
    pub country: Option<String>,
    /// Identity document kind.
    pub id_proof_type: Option<IdProofType>,
}
