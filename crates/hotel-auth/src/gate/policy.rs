//! The allow-list check run before privileged handlers.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use hotel_entity::principal::AccessType;

use crate::error::AuthError;
use crate::jwt::Claims;
use crate::token::TokenService;

/// Identity attached to a request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Principal email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Principal id within its kind's table.
    pub subject_id: Uuid,
    /// Principal kind.
    pub role: AccessType,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            subject_id: claims.sub,
            role: claims.role,
        }
    }
}

/// Admits a token only if its role is one of `allowed`.
///
/// Membership is exact: listing `Manager` does not admit `Admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    allowed: Vec<AccessType>,
}

impl AccessGate {
    /// Gate admitting exactly the given roles.
    pub fn allow(roles: &[AccessType]) -> Self {
        Self {
            allowed: roles.to_vec(),
        }
    }

    /// Roles this gate admits.
    pub fn allowed(&self) -> &[AccessType] {
        &self.allowed
    }

    /// Runs the check for a raw header value.
    pub fn authorize(
        &self,
        tokens: &TokenService,
        header: Option<&str>,
    ) -> Result<AuthContext, AuthError> {
        let token = header
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = tokens.validate(token)?;

        if !self.allowed.contains(&claims.role) {
            debug!(role = %claims.role, allowed = ?self.allowed, "Role not admitted");
            return Err(AuthError::Forbidden(claims.role));
        }

        Ok(claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::config::AuthConfig;
    use hotel_database::MemoryStore;
    use std::sync::Arc;

    fn tokens() -> TokenService {
        TokenService::new(
            &AuthConfig {
                secret_key: "gate-secret".into(),
                access_ttl_hours: 24,
                refresh_ttl_hours: 168,
                password_min_length: 8,
                bootstrap_admin: None,
            },
            Arc::new(MemoryStore::new()),
        )
    }

    fn token_for(tokens: &TokenService, role: AccessType) -> String {
        tokens
            .issue("p@hotel.test", "P", "Q", Uuid::new_v4(), role)
            .unwrap()
            .token
    }

    #[test]
    fn test_manager_gate_rejects_guest_admits_manager() {
        let tokens = tokens();
        let gate = AccessGate::allow(&[AccessType::Manager]);

        let guest = token_for(&tokens, AccessType::Guest);
        assert_eq!(
            gate.authorize(&tokens, Some(&guest)),
            Err(AuthError::Forbidden(AccessType::Guest))
        );

        let manager = token_for(&tokens, AccessType::Manager);
        let ctx = gate.authorize(&tokens, Some(&manager)).unwrap();
        assert_eq!(ctx.role, AccessType::Manager);
        assert_eq!(ctx.email, "p@hotel.test");
    }

    #[test]
    fn test_no_role_hierarchy() {
        let tokens = tokens();
        let gate = AccessGate::allow(&[AccessType::Manager]);
        let admin = token_for(&tokens, AccessType::Admin);
        assert_eq!(
            gate.authorize(&tokens, Some(&admin)),
            Err(AuthError::Forbidden(AccessType::Admin))
        );
    }

    #[test]
    fn test_missing_and_blank_header() {
        let tokens = tokens();
        let gate = AccessGate::allow(&AccessType::ALL);
        assert_eq!(gate.authorize(&tokens, None), Err(AuthError::MissingToken));
        assert_eq!(
            gate.authorize(&tokens, Some("   ")),
            Err(AuthError::MissingToken)
        );
        assert!(matches!(
            gate.authorize(&tokens, Some("garbage")),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
