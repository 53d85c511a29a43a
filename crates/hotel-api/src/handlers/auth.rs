//! Auth handlers: per-role login, guest signup and email verification.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use hotel_core::error::AppError;
use hotel_entity::principal::AccessType;

use crate::dto::request::{
    LoginRequest, ResendVerificationRequest, SignupRequest, VerifyEmailQuery,
};
use crate::dto::response::{LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

const LINK_SENT: &str = "Verification link is send to email";

async fn login_as(
    state: &AppState,
    kind: AccessType,
    req: LoginRequest,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state
        .accounts
        .login(kind, &req.email, &req.password)
        .await?;
    Ok(Json(outcome.into()))
}

/// POST /admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    login_as(&state, AccessType::Admin, req).await
}

/// POST /manager/login
pub async fn manager_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    login_as(&state, AccessType::Manager, req).await
}

/// POST /driver/login
pub async fn driver_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    login_as(&state, AccessType::Driver, req).await
}

/// POST /guest/login
pub async fn guest_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    login_as(&state, AccessType::Guest, req).await
}

/// POST /guest/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.accounts.signup_guest(req.into()).await?;
    Ok(Json(MessageResponse::new(LINK_SENT)))
}

/// POST /guest/verify-email/resend
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.accounts.resend_verification(&req.email).await?;
    Ok(Json(MessageResponse::new(LINK_SENT)))
}

/// GET /guest/verify-email/confirm
///
/// Opened from the email, so it answers with HTML rather than JSON.
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Response {
    let result = state
        .verification
        .verify_email(&query.expires, &query.hash, &query.id, &query.signature)
        .await;

    match result {
        Ok(_) => (
            StatusCode::OK,
            Html(page(
                "Email verified",
                "Your email address has been verified. You can now log in.",
            )),
        )
            .into_response(),
        Err(e) => {
            let status = ApiError(AppError::from(e)).status();
            let message = match status {
                StatusCode::INTERNAL_SERVER_ERROR => "Something went wrong, please try again.",
                _ => "This verification link is invalid or has expired.",
            };
            (status, Html(page("Verification failed", message))).into_response()
        }
    }
}

fn page(title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head>\
         <body style=\"font-family: Arial, sans-serif; text-align: center; padding: 48px;\">\
         <h1>{title}</h1><p>{message}</p></body></html>"
    )
}
