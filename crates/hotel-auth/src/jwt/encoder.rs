//! JWT signing with the shared secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use hotel_core::config::AuthConfig;
use hotel_entity::principal::AccessType;

use super::claims::{Claims, RefreshClaims};
use crate::error::AuthError;

/// Signs access and refresh tokens (HS256).
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// A freshly issued token pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Access token.
    pub token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiry.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            access_ttl: Duration::hours(config.access_ttl_hours as i64),
            refresh_ttl: Duration::hours(config.refresh_ttl_hours as i64),
        }
    }

    /// Signs an access token and a refresh token for the given identity.
    pub fn generate_token_pair(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        subject_id: Uuid,
        role: AccessType,
    ) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_exp = now + self.access_ttl;

        let access = Claims {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            sub: subject_id,
            role,
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
        };
        let refresh = RefreshClaims {
            role,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        Ok(TokenPair {
            token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
            expires_at: access_exp,
        })
    }

    /// Signs arbitrary claims. Exposed for tests that need hand-made tokens.
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
