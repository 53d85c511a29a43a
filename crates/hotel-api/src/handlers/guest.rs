//! Guest profile handler.

use axum::Json;
use axum::extract::{Path, State};

use hotel_entity::guest::Guest;

use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /guest/get/{id}
///
/// Staff may read any guest; a guest only their own profile.
pub async fn get_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Guest>, ApiError> {
    let guest_id = parse_uuid(&id)?;
    auth.ensure_owner(guest_id)?;
    let guest = state.accounts.get_guest(guest_id).await?;
    Ok(Json(guest))
}
