//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token signing and credential configuration.
///
/// `secret_key` signs both session tokens and email verification links.
/// It is read once at startup and never re-read.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC-SHA256 secret.
    pub secret_key: String,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_hours: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Minimum password length accepted at signup.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Admin account created at startup when absent.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the admin seeded on first start.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Login email.
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Given name.
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
}

impl AuthConfig {
    /// Fails when the secret is empty; tokens signed with an empty key are forgeable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.secret_key.trim().is_empty() {
            return Err(AppError::configuration("auth.secret_key must not be empty"));
        }
        if self.access_ttl_hours == 0 || self.refresh_ttl_hours == 0 {
            return Err(AppError::configuration("token TTLs must be positive"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"***")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .field("password_min_length", &self.password_min_length)
            .field(
                "bootstrap_admin",
                &self.bootstrap_admin.as_ref().map(|a| &a.email),
            )
            .finish()
    }
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_ttl() -> u64 {
    168
}

fn default_password_min() -> usize {
    8
}

fn default_admin_name() -> String {
    "Admin".to_string()
}
