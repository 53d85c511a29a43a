//! Route definitions for the hotel HTTP API.
//!
//! Routes are grouped by the roles they admit; each privileged group
//! carries its own [`RoleGate`]. Every group except booking runs under the
//! request timeout. Booking is bounded by the reservation engine instead.
//! Amendments and deletions stay under the timeout: the engine runs them on
//! detached tasks, so a timed-out request still finishes both writes.

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};

use hotel_entity::principal::AccessType;

use crate::handlers;
use crate::middleware::auth::{RoleGate, require_role};
use crate::middleware::timeout::enforce_timeout;
use crate::state::AppState;

const STAFF: &[AccessType] = &[AccessType::Admin, AccessType::Manager];
const STAFF_AND_GUEST: &[AccessType] = &[AccessType::Admin, AccessType::Manager, AccessType::Guest];
const BOOKERS: &[AccessType] = &[AccessType::Manager, AccessType::Guest];

/// Build the Axum router with all routes, gates and timeouts.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let request_budget = Duration::from_secs(state.config.server.request_timeout_seconds);

    let standard = Router::new()
        .merge(public_routes())
        .merge(guest_routes(&state))
        .merge(room_routes(&state))
        .merge(reservation_routes(&state))
        .layer(axum_middleware::from_fn_with_state(
            request_budget,
            enforce_timeout,
        ));

    Router::new()
        .merge(standard)
        .merge(booking_routes(&state))
        .with_state(state)
}

fn gate(state: &AppState, roles: &[AccessType]) -> RoleGate {
    RoleGate::new(state.tokens.clone(), roles)
}

/// Health, logins, signup and email verification
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::health))
        .route("/admin/login", post(handlers::auth::admin_login))
        .route("/manager/login", post(handlers::auth::manager_login))
        .route("/driver/login", post(handlers::auth::driver_login))
        .route("/guest/login", post(handlers::auth::guest_login))
        .route("/guest/signup", post(handlers::auth::signup))
        .route(
            "/guest/verify-email/confirm",
            get(handlers::auth::verify_email),
        )
        .route(
            "/guest/verify-email/resend",
            post(handlers::auth::resend_verification),
        )
        .route("/room/get/{id}", get(handlers::room::get_room))
}

/// Guest profiles
fn guest_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/guest/get/{id}", get(handlers::guest::get_guest))
        .route_layer(axum_middleware::from_fn_with_state(
            gate(state, STAFF_AND_GUEST),
            require_role,
        ))
}

/// Room maintenance
fn room_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/room/create", post(handlers::room::create_room))
        .route("/room/update-all/{id}", put(handlers::room::update_room))
        .route(
            "/room/update-cleaning-status/{id}",
            patch(handlers::room::update_cleaning_status),
        )
        .route("/room/delete/{id}", delete(handlers::room::delete_room))
        .route_layer(axum_middleware::from_fn_with_state(
            gate(state, STAFF),
            require_role,
        ))
}

/// Reservation reads and amendments
fn reservation_routes(state: &AppState) -> Router<AppState> {
    let readers = Router::new()
        .route(
            "/reservation/get/{id}",
            get(handlers::reservation::get_reservation),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            gate(state, STAFF_AND_GUEST),
            require_role,
        ));

    let writers = Router::new()
        .route(
            "/reservation/update-all/{id}",
            put(handlers::reservation::update_reservation),
        )
        .route(
            "/reservation/delete/{id}/{room_id}",
            delete(handlers::reservation::delete_reservation),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            gate(state, BOOKERS),
            require_role,
        ));

    readers.merge(writers)
}

/// Booking, under the engine's own deadline
fn booking_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/reservation/create",
            post(handlers::reservation::create_reservation),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            gate(state, BOOKERS),
            require_role,
        ))
}
