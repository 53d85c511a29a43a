//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod logging;
pub mod reservation;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, BootstrapAdmin};
pub use self::database::DatabaseConfig;
pub use self::email::{EmailConfig, SmtpConfig};
pub use self::logging::LoggingConfig;
pub use self::reservation::ReservationConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and password settings.
    pub auth: AuthConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Booking settings.
    #[serde(default)]
    pub reservation: ReservationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `HOTEL_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOTEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        self.database.validate()?;
        self.email.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<AppConfig, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = from_toml(
            r#"
            [auth]
            secret_key = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.access_ttl_hours, 24);
        assert_eq!(config.auth.refresh_ttl_hours, 168);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.reservation.booking_timeout_seconds, 100);
        assert_eq!(config.email.provider, "log");
        assert_eq!(config.database.provider, "memory");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let config = from_toml(
            r#"
            [auth]
            secret_key = ""
            "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_postgres_requires_url() {
        let config = from_toml(
            r#"
            [auth]
            secret_key = "s3cret"

            [database]
            provider = "postgres"
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
