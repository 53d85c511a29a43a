//! Principal repository: login lookups and token bookkeeping.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_entity::principal::{AccessType, NewPrincipal, Principal, PrincipalRef};

use super::db_error;
use crate::store::PrincipalStore;

/// Repository spanning the `admins`, `managers`, `guests` and `drivers` tables.
///
/// The table and identifier column come from [`AccessType`], never from
/// caller-supplied strings.
#[derive(Debug, Clone)]
pub struct PrincipalRepository {
    pool: PgPool,
}

impl PrincipalRepository {
    /// Create a new principal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `SELECT` projecting any principal table onto [`Principal`].
fn select_principal(kind: AccessType) -> String {
    let verified = match kind {
        AccessType::Guest => "is_verified",
        _ => "TRUE AS is_verified",
    };
    format!(
        "SELECT {id} AS id, access_type, email, first_name, last_name, password_hash, \
         token, refresh_token, {verified}, created_at, updated_at FROM {table}",
        id = kind.id_column(),
        table = kind.table(),
    )
}

#[async_trait]
impl PrincipalStore for PrincipalRepository {
    async fn find_principal_by_email(
        &self,
        kind: AccessType,
        email: &str,
    ) -> AppResult<Option<Principal>> {
        let sql = format!("{} WHERE LOWER(email) = LOWER($1)", select_principal(kind));
        sqlx::query_as::<_, Principal>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find principal by email", e))
    }

    async fn insert_principal(&self, new: NewPrincipal) -> AppResult<Principal> {
        let kind = new.access_type;
        if kind == AccessType::Guest {
            return Err(AppError::validation(
                "Guests must be created through the guest store",
            ));
        }
        let sql = format!(
            "INSERT INTO {table} ({id}, access_type, email, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {id} AS id, access_type, email, first_name, last_name, password_hash, \
             token, refresh_token, TRUE AS is_verified, created_at, updated_at",
            table = kind.table(),
            id = kind.id_column(),
        );
        sqlx::query_as::<_, Principal>(&sql)
            .bind(Uuid::new_v4())
            .bind(kind)
            .bind(&new.email)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(&new.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create principal", e))
    }

    async fn store_tokens(
        &self,
        principal: PrincipalRef,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        let sql = format!(
            "UPDATE {table} SET token = $1, refresh_token = $2, updated_at = NOW() WHERE {id} = $3",
            table = principal.kind.table(),
            id = principal.kind.id_column(),
        );
        let result = sqlx::query(&sql)
            .bind(access_token)
            .bind(refresh_token)
            .bind(principal.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to store tokens", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::database(format!("No row for {principal}")));
        }
        Ok(())
    }
}
