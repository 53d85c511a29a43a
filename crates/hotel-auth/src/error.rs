//! Token and gate failures.

use hotel_core::error::AppError;
use hotel_entity::principal::AccessType;
use thiserror::Error;

/// Why a token or request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `X-Auth-Token` header.
    #[error("Token is missing")]
    MissingToken,

    /// Signature, structure or claims are invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The token's `exp` is in the past.
    #[error("Token has expired")]
    Expired,

    /// The token is valid but its role is not in the allow-list.
    #[error("Unauthorized access to {0}")]
    Forbidden(AccessType),

    /// Signing failed.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::MissingToken => AppError::validation(err.to_string()),
            AuthError::InvalidToken(_) | AuthError::Expired => {
                AppError::authentication(err.to_string())
            }
            AuthError::Forbidden(_) => AppError::authorization(err.to_string()),
            AuthError::Signing(_) => AppError::internal(err.to_string()),
        }
    }
}
