//! Token service: issue, validate and persist token pairs.

use std::sync::Arc;

use tracing::{debug, error};

use hotel_core::config::AuthConfig;
use hotel_core::error::{AppError, ErrorKind};
use hotel_core::result::AppResult;
use hotel_database::store::PrincipalStore;
use hotel_entity::principal::{AccessType, Principal, PrincipalRef};
use uuid::Uuid;

use crate::error::AuthError;
use crate::jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};

/// Issues and validates session tokens with the process-wide secret.
///
/// The secret is captured at construction and never re-read.
#[derive(Clone)]
pub struct TokenService {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    principals: Arc<dyn PrincipalStore>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoder", &self.encoder)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Builds the service from auth configuration.
    pub fn new(config: &AuthConfig, principals: Arc<dyn PrincipalStore>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            principals,
        }
    }

    /// Signs a new access/refresh pair for the given identity.
    pub fn issue(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        subject_id: Uuid,
        role: AccessType,
    ) -> Result<TokenPair, AuthError> {
        self.encoder
            .generate_token_pair(email, first_name, last_name, subject_id, role)
    }

    /// Validates signature and expiry and returns the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.decoder.decode(token)
    }

    /// Stores the pair on the principal's row, replacing the previous one.
    ///
    /// Earlier tokens are not revoked; they expire on their own.
    pub async fn persist(&self, principal: PrincipalRef, pair: &TokenPair) -> AppResult<()> {
        self.principals
            .store_tokens(principal, &pair.token, &pair.refresh_token)
            .await
            .map_err(|e| {
                error!(principal = %principal, error = %e, "Failed to persist token pair");
                AppError::with_source(
                    ErrorKind::Internal,
                    "Error occured while updating tokens",
                    e,
                )
            })
    }

    /// Issues a pair for `principal` and persists it. Nothing is returned
    /// unless the pair was stored.
    pub async fn login(&self, principal: &Principal) -> AppResult<TokenPair> {
        let pair = self.issue(
            &principal.email,
            &principal.first_name,
            &principal.last_name,
            principal.id,
            principal.access_type,
        )?;
        self.persist(principal.reference(), &pair).await?;
        debug!(principal = %principal.reference(), "Issued token pair");
        Ok(pair)
    }
}
