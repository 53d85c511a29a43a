//! Room handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_entity::room::Room;

use crate::dto::request::{CleaningStatusRequest, CreateRoomRequest, UpdateRoomRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /room/create
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let room = state.rooms.create_room(req.into()).await?;
    tracing::debug!(room_id = %room.room_id, by = %auth.subject_id, "Room created via API");
    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /room/get/{id}
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Room>, ApiError> {
    let room = state.rooms.get_room(parse_uuid(&id)?).await?;
    Ok(Json(room))
}

/// PUT /room/update-all/{id}
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let room_id = parse_uuid(&id)?;
    let room = state
        .rooms
        .update_room_details(room_id, req.into_update()?)
        .await?;
    Ok(Json(room))
}

/// PATCH /room/update-cleaning-status/{id}
pub async fn update_cleaning_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CleaningStatusRequest>,
) -> Result<Json<Room>, ApiError> {
    let room = state
        .rooms
        .update_cleaning_status(parse_uuid(&id)?, req.cleaning_status)
        .await?;
    Ok(Json(room))
}

/// DELETE /room/delete/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.rooms.delete_room(parse_uuid(&id)?).await?;
    Ok(Json(MessageResponse::new("Room deleted successfully")))
}
