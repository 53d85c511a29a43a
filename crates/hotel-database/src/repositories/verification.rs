//! Email verification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_entity::verification::EmailVerification;

use super::db_error;
use crate::store::VerificationStore;

/// Repository for the `email_verifications` table.
#[derive(Debug, Clone)]
pub struct VerificationRepository {
    pool: PgPool,
}

impl VerificationRepository {
    /// Create a new verification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationStore for VerificationRepository {
    async fn upsert_verification(&self, record: &EmailVerification) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO email_verifications (verification_id, guest_id, token, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (guest_id) DO UPDATE SET verification_id = EXCLUDED.verification_id, \
             token = EXCLUDED.token, expires_at = EXCLUDED.expires_at, created_at = EXCLUDED.created_at",
        )
        .bind(record.verification_id)
        .bind(record.guest_id)
        .bind(&record.token)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to store verification", e))?;
        Ok(())
    }

    async fn find_verification(&self, guest_id: Uuid) -> AppResult<Option<EmailVerification>> {
        sqlx::query_as::<_, EmailVerification>(
            "SELECT * FROM email_verifications WHERE guest_id = $1",
        )
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find verification", e))
    }

    async fn delete_verification(&self, guest_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM email_verifications WHERE guest_id = $1")
            .bind(guest_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete verification", e))?;
        Ok(result.rows_affected() == 1)
    }
}
