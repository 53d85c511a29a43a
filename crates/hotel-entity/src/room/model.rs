//! Room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{Availability, CleaningStatus, RoomType};

/// A bookable room in a branch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub room_id: Uuid,
    /// Owning branch.
    pub branch_id: Uuid,
    /// Door number, unique within the branch.
    pub room_number: i32,
    /// Bed configuration.
    pub room_type: RoomType,
    /// Derived from whether an active reservation exists.
    pub availability: Availability,
    /// Housekeeping state.
    pub cleaning_status: CleaningStatus,
    /// Price per stay.
    pub price: f64,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Image URLs.
    pub images: Vec<String>,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Builds an available, cleaned room from creation data.
    pub fn from_new(new: NewRoom) -> Self {
        let now = Utc::now();
        Self {
            room_id: Uuid::new_v4(),
            branch_id: new.branch_id,
            room_number: new.room_number,
            room_type: new.room_type,
            availability: Availability::Available,
            cleaning_status: new.cleaning_status.unwrap_or(CleaningStatus::Cleaned),
            price: new.price,
            capacity: new.capacity,
            images: new.images,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether an active reservation holds the room.
    pub fn is_occupied(&self) -> bool {
        self.availability == Availability::Occupied
    }
}

/// Data required to create a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    /// Owning branch.
    pub branch_id: Uuid,
    /// Door number.
    pub room_number: i32,
    /// Bed configuration.
    pub room_type: RoomType,
    /// Initial housekeeping state, cleaned when absent.
    pub cleaning_status: Option<CleaningStatus>,
    /// Price per stay.
    pub price: f64,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Fields the generic room update may change.
///
/// Availability is deliberately absent: it is owned by the reservation engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomDetailsUpdate {
    /// New door number.
    pub room_number: Option<i32>,
    /// New bed configuration.
    pub room_type: Option<RoomType>,
    /// New housekeeping state.
    pub cleaning_status: Option<CleaningStatus>,
    /// New price.
    pub price: Option<f64>,
    /// New capacity.
    pub capacity: Option<i32>,
}

impl RoomDetailsUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.room_number.is_none()
            && self.room_type.is_none()
            && self.cleaning_status.is_none()
            && self.price.is_none()
            && self.capacity.is_none()
    }

    /// Applies the update to a room in place.
    pub fn apply(&self, room: &mut Room) {
        if let Some(number) = self.room_number {
            room.room_number = number;
        }
        if let Some(room_type) = self.room_type {
            room.room_type = room_type;
        }
        if let Some(status) = self.cleaning_status {
            room.cleaning_status = status;
        }
        if let Some(price) = self.price {
            room.price = price;
        }
        if let Some(capacity) = self.capacity {
            room.capacity = capacity;
        }
        room.updated_at = Utc::now();
    }
}
