//! Role gate middleware.
//!
//! Each privileged route group carries a [`RoleGate`] naming the roles it
//! admits. The token is read from `X-Auth-Token`; on success the
//! [`AuthContext`] is stored in the request extensions for handlers.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use hotel_auth::gate::TOKEN_HEADER;
use hotel_auth::{AccessGate, AuthContext, TokenService};
use hotel_entity::principal::AccessType;

use crate::error::ApiError;

/// Token service plus the allow-list of one route group.
#[derive(Debug, Clone)]
pub struct RoleGate {
    tokens: Arc<TokenService>,
    gate: AccessGate,
}

impl RoleGate {
    /// Gate admitting exactly `roles`.
    pub fn new(tokens: Arc<TokenService>, roles: &[AccessType]) -> Self {
        Self {
            tokens,
            gate: AccessGate::allow(roles),
        }
    }
}

/// Rejects the request unless it carries a valid token for an admitted role.
pub async fn require_role(
    State(gate): State<RoleGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    let context: AuthContext = gate.gate.authorize(&gate.tokens, header)?;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
