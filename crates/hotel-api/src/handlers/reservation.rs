//! Reservation handlers.
//!
//! Guests act on their own reservations only; a guest booking is always
//! made in the caller's name.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_entity::reservation::Reservation;
use hotel_service::reservation::{BookingRequest, ReservationUpdateRequest};

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody, parse_uuid};
use crate::state::AppState;

/// POST /reservation/create
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(mut req): JsonBody<BookingRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    if auth.is_guest() {
        req.guest_id = Some(auth.subject_id);
    }
    let reservation = state.reservations.create_reservation(req).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /reservation/get/{id}
pub async fn get_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = state
        .reservations
        .get_reservation(parse_uuid(&id)?)
        .await?;
    auth.ensure_owner(reservation.guest_id)?;
    Ok(Json(reservation))
}

/// PUT /reservation/update-all/{id}
pub async fn update_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ReservationUpdateRequest>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation_id = parse_uuid(&id)?;
    if auth.is_guest() {
        let current = state.reservations.get_reservation(reservation_id).await?;
        auth.ensure_owner(current.guest_id)?;
    }
    let reservation = state
        .reservations
        .update_reservation_details(reservation_id, req)
        .await?;
    Ok(Json(reservation))
}

/// DELETE /reservation/delete/{id}/{room_id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, room_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let reservation_id = parse_uuid(&id)?;
    let room_id = parse_uuid(&room_id)?;
    if auth.is_guest() {
        let current = state.reservations.get_reservation(reservation_id).await?;
        auth.ensure_owner(current.guest_id)?;
    }
    state
        .reservations
        .delete_reservation(reservation_id, room_id)
        .await?;
    Ok(Json(MessageResponse::new("Reservation deleted successfully")))
}
