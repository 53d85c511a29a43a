//! Room repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_entity::room::{Availability, Room, RoomDetailsUpdate};

use super::db_error;
use crate::store::RoomStore;

/// Repository for the `rooms` table.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for RoomRepository {
    async fn find_room(&self, room_id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE room_id = $1")
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find room by id", e))
    }

    async fn room_number_taken(
        &self,
        branch_id: Uuid,
        room_number: i32,
        excluding: Option<Uuid>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM rooms WHERE branch_id = $1 AND room_number = $2 \
             AND ($3::uuid IS NULL OR room_id <> $3))",
        )
        .bind(branch_id)
        .bind(room_number)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check room number", e))
    }

    async fn insert_room(&self, room: &Room) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO rooms (room_id, branch_id, room_number, room_type, availability, \
             cleaning_status, price, capacity, images, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(room.room_id)
        .bind(room.branch_id)
        .bind(room.room_number)
        .bind(room.room_type)
        .bind(room.availability)
        .bind(room.cleaning_status)
        .bind(room.price)
        .bind(room.capacity)
        .bind(&room.images)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create room", e))?;
        Ok(())
    }

    async fn update_room_details(
        &self,
        room_id: Uuid,
        update: &RoomDetailsUpdate,
    ) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET \
             room_number = COALESCE($2, room_number), \
             room_type = COALESCE($3, room_type), \
             cleaning_status = COALESCE($4, cleaning_status), \
             price = COALESCE($5, price), \
             capacity = COALESCE($6, capacity), \
             updated_at = NOW() \
             WHERE room_id = $1 RETURNING *",
        )
        .bind(room_id)
        .bind(update.room_number)
        .bind(update.room_type)
        .bind(update.cleaning_status)
        .bind(update.price)
        .bind(update.capacity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update room", e))
    }

    async fn set_room_availability(
        &self,
        room_id: Uuid,
        availability: Availability,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE rooms SET availability = $2, updated_at = NOW() WHERE room_id = $1")
                .bind(room_id)
                .bind(availability)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to update room availability", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn claim_room(&self, room_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE rooms SET availability = 'occupied', updated_at = NOW() \
             WHERE room_id = $1 AND availability = 'available'",
        )
        .bind(room_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to claim room", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn room_has_reservations(&self, room_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM reservations WHERE room_id = $1)",
        )
        .bind(room_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check room reservations", e))
    }

    async fn delete_available_room(&self, room_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM rooms WHERE room_id = $1 AND availability = 'available' \
             AND NOT EXISTS (SELECT 1 FROM reservations WHERE room_id = $1)",
        )
        .bind(room_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete room", e))?;
        Ok(result.rows_affected() == 1)
    }
}
