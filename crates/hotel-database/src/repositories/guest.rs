//! Guest repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_entity::guest::Guest;

use super::db_error;
use crate::store::GuestStore;

/// Repository for the `guests` table.
#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Create a new guest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const GUEST_COLUMNS: &str = "guest_id, email, first_name, last_name, password_hash, phone, \
     gender, country, id_proof_type, is_verified, token, refresh_token, created_at, updated_at";

#[async_trait]
impl GuestStore for GuestRepository {
    async fn insert_guest(&self, guest: &Guest) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO guests (guest_id, email, first_name, last_name, password_hash, phone, \
             gender, country, id_proof_type, is_verified, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(guest.guest_id)
        .bind(&guest.email)
        .bind(&guest.first_name)
        .bind(&guest.last_name)
        .bind(&guest.password_hash)
        .bind(&guest.phone)
        .bind(&guest.gender)
        .bind(&guest.country)
        .bind(guest.id_proof_type)
        .bind(guest.is_verified)
        .bind(guest.created_at)
        .bind(guest.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create guest", e))?;
        Ok(())
    }

    async fn find_guest(&self, guest_id: Uuid) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE guest_id = $1"
        ))
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find guest by id", e))
    }

    async fn find_guest_by_email(&self, email: &str) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find guest by email", e))
    }

    async fn mark_guest_verified(&self, guest_id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE guests SET is_verified = TRUE, updated_at = NOW() WHERE guest_id = $1")
                .bind(guest_id)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to mark guest verified", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Guest {guest_id} not found")));
        }
        Ok(())
    }
}
