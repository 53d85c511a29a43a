//! `AuthUser` extractor: the identity the role gate attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use hotel_auth::AuthContext;
use hotel_core::error::AppError;
use hotel_entity::principal::AccessType;

use crate::error::ApiError;

/// Authenticated caller, available on routes behind a role gate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl AuthUser {
    /// Whether the caller is a guest.
    pub fn is_guest(&self) -> bool {
        self.0.role == AccessType::Guest
    }

    /// Guests may only act on their own records; staff on any.
    pub fn ensure_owner(&self, guest_id: Uuid) -> Result<(), ApiError> {
        if self.is_guest() && self.0.subject_id != guest_id {
            return Err(AppError::authorization(format!(
                "Unauthorized access to {}",
                self.0.role
            ))
            .into());
        }
        Ok(())
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::authentication("Token is missing").into())
    }
}
