//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use hotel_core::error::AppError;
use hotel_entity::guest::IdProofType;
use hotel_entity::room::{CleaningStatus, NewRoom, RoomDetailsUpdate, RoomType};
use hotel_service::account::GuestSignup;

/// Login request body, shared by every principal kind.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Guest signup body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 5, max = 20, message = "Phone number is not valid"))]
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub id_proof_type: Option<IdProofType>,
}

impl From<SignupRequest> for GuestSignup {
    fn from(req: SignupRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            gender: req.gender,
            country: req.country,
            id_proof_type: req.id_proof_type,
        }
    }
}

/// Request for a fresh verification link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
}

/// Query string of a verification link. Missing values arrive empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyEmailQuery {
    #[serde(default)]
    pub expires: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub signature: String,
}

/// Room creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    pub branch_id: Uuid,
    #[validate(range(min = 1, message = "Room number must be positive"))]
    pub room_number: i32,
    pub room_type: RoomType,
    pub cleaning_status: Option<CleaningStatus>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,
    #[validate(range(min = 1, message = "Capacity must be greater than 0"))]
    pub capacity: i32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(req: CreateRoomRequest) -> Self {
        Self {
            branch_id: req.branch_id,
            room_number: req.room_number,
            room_type: req.room_type,
            cleaning_status: req.cleaning_status,
            price: req.price,
            capacity: req.capacity,
            images: req.images,
        }
    }
}

/// Room details update. `availability` is accepted on the wire only to be
/// refused: it is owned by the reservation engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(range(min = 1, message = "Room number must be positive"))]
    pub room_number: Option<i32>,
    pub room_type: Option<RoomType>,
    pub cleaning_status: Option<CleaningStatus>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: Option<f64>,
    #[validate(range(min = 1, message = "Capacity must be greater than 0"))]
    pub capacity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<serde_json::Value>,
}

impl UpdateRoomRequest {
    /// Converts to a store update, refusing any availability change.
    pub fn into_update(self) -> Result<RoomDetailsUpdate, AppError> {
        if self.availability.is_some() {
            return Err(AppError::validation(
                "Room availability can only be changed through reservations",
            ));
        }
        Ok(RoomDetailsUpdate {
            room_number: self.room_number,
            room_type: self.room_type,
            cleaning_status: self.cleaning_status,
            price: self.price,
            capacity: self.capacity,
        })
    }
}

/// Housekeeping status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CleaningStatusRequest {
    pub cleaning_status: CleaningStatus,
}
