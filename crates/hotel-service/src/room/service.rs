//! Room service: create, read, update and delete rooms.
//!
//! Availability is not writable here; it belongs to the reservation engine.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_database::store::RoomStore;
use hotel_entity::room::{CleaningStatus, NewRoom, Room, RoomDetailsUpdate};

const ROOM_NOT_FOUND: &str = "Can't find room with id";
const DUPLICATE_NUMBER: &str = "Room Number already Exist with Branch id.";

/// Manages room records.
#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomStore>,
}

impl std::fmt::Debug for RoomService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomService").finish_non_exhaustive()
    }
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(rooms: Arc<dyn RoomStore>) -> Self {
        Self { rooms }
    }

    /// Creates a room. New rooms start available.
    pub async fn create_room(&self, new: NewRoom) -> AppResult<Room> {
        validate_numbers(Some(new.room_number), Some(new.price), Some(new.capacity))?;

        if self
            .rooms
            .room_number_taken(new.branch_id, new.room_number, None)
            .await?
        {
            return Err(AppError::conflict(DUPLICATE_NUMBER));
        }

        let room = Room::from_new(new);
        self.rooms.insert_room(&room).await?;

        info!(
            room_id = %room.room_id,
            branch_id = %room.branch_id,
            room_number = room.room_number,
            "Room created"
        );
        Ok(room)
    }

    /// Fetches a room.
    pub async fn get_room(&self, room_id: Uuid) -> AppResult<Room> {
        self.rooms
            .find_room(room_id)
            .await?
            .ok_or_else(|| AppError::not_found(ROOM_NOT_FOUND))
    }

    /// Applies a details update. A changed room number must stay unique in
    /// the branch.
    pub async fn update_room_details(
        &self,
        room_id: Uuid,
        update: RoomDetailsUpdate,
    ) -> AppResult<Room> {
        if update.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        validate_numbers(update.room_number, update.price, update.capacity)?;

        let room = self.get_room(room_id).await?;
        if let Some(number) = update.room_number {
            if number != room.room_number
                && self
                    .rooms
                    .room_number_taken(room.branch_id, number, Some(room_id))
                    .await?
            {
                return Err(AppError::conflict(DUPLICATE_NUMBER));
            }
        }

        let updated = self
            .rooms
            .update_room_details(room_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(ROOM_NOT_FOUND))?;
        info!(room_id = %room_id, "Room updated");
        Ok(updated)
    }

    /// Sets the housekeeping state.
    pub async fn update_cleaning_status(
        &self,
        room_id: Uuid,
        status: CleaningStatus,
    ) -> AppResult<Room> {
        let update = RoomDetailsUpdate {
            cleaning_status: Some(status),
            ..Default::default()
        };
        self.update_room_details(room_id, update).await
    }

    /// Deletes a room. Occupied rooms and rooms with reservation history
    /// cannot be deleted.
    pub async fn delete_room(&self, room_id: Uuid) -> AppResult<()> {
        self.get_room(room_id).await?;
        if self.rooms.room_has_reservations(room_id).await? {
            return Err(AppError::conflict(
                "Room has reservations and can't be deleted.",
            ));
        }
        if !self.rooms.delete_available_room(room_id).await? {
            return Err(AppError::conflict(
                "Room is occupied and can't be deleted.",
            ));
        }
        info!(room_id = %room_id, "Room deleted");
        Ok(())
    }
}

fn validate_numbers(
    room_number: Option<i32>,
    price: Option<f64>,
    capacity: Option<i32>,
) -> AppResult<()> {
    if room_number.is_some_and(|n| n <= 0) {
        return Err(AppError::validation("Room number must be positive"));
    }
    if price.is_some_and(|p| !p.is_finite() || p <= 0.0) {
        return Err(AppError::validation("Price must be greater than 0"));
    }
    if capacity.is_some_and(|c| c <= 0) {
        return Err(AppError::validation("Capacity must be greater than 0"));
    }
    Ok(())
}
