//! Reservation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_entity::reservation::{Reservation, ReservationChanges};

use super::db_error;
use crate::store::ReservationStore;

/// Repository for the `reservations` table.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for ReservationRepository {
    async fn insert_reservation(&self, r: &Reservation) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO reservations (reservation_id, room_id, guest_id, check_in_time, \
             check_out_time, deposit_amount, pending_amount, numbers_of_guests, is_checked_out, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(r.reservation_id)
        .bind(r.room_id)
        .bind(r.guest_id)
        .bind(r.check_in_time)
        .bind(r.check_out_time)
        .bind(r.deposit_amount)
        .bind(r.pending_amount)
        .bind(r.numbers_of_guests)
        .bind(r.is_checked_out)
        .bind(r.created_at)
        .bind(r.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create reservation", e))?;
        Ok(())
    }

    async fn find_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE reservation_id = $1")
            .bind(reservation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find reservation by id", e))
    }

    async fn update_active_reservation(
        &self,
        reservation_id: Uuid,
        changes: &ReservationChanges,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reservations SET check_in_time = $2, check_out_time = $3, \
             deposit_amount = $4, pending_amount = $5, numbers_of_guests = $6, \
             is_checked_out = $7, updated_at = NOW() \
             WHERE reservation_id = $1 AND is_checked_out = FALSE",
        )
        .bind(reservation_id)
        .bind(changes.check_in_time)
        .bind(changes.check_out_time)
        .bind(changes.deposit_amount)
        .bind(changes.pending_amount)
        .bind(changes.numbers_of_guests)
        .bind(changes.is_checked_out)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update reservation", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn reopen_reservation(&self, previous: &Reservation) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reservations SET check_in_time = $2, check_out_time = $3, \
             deposit_amount = $4, pending_amount = $5, numbers_of_guests = $6, \
             is_checked_out = $7, updated_at = $8 \
             WHERE reservation_id = $1 AND is_checked_out = TRUE",
        )
        .bind(previous.reservation_id)
        .bind(previous.check_in_time)
        .bind(previous.check_out_time)
        .bind(previous.deposit_amount)
        .bind(previous.pending_amount)
        .bind(previous.numbers_of_guests)
        .bind(previous.is_checked_out)
        .bind(previous.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to reopen reservation", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "DELETE FROM reservations WHERE reservation_id = $1 RETURNING *",
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete reservation", e))
    }
}
