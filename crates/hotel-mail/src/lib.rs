//! # hotel-mail
//!
//! Outbound email for the hotel backend. The services only see the
//! [`EmailSender`] trait; the concrete sender is picked from configuration.

pub mod log;
pub mod memory;
pub mod resend;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use hotel_core::config::EmailConfig;

pub use self::log::LogSender;
pub use self::memory::{MemorySender, SentEmail};
pub use self::resend::ResendSender;
pub use self::smtp::SmtpSender;

/// Email delivery error.
#[derive(Debug, Error)]
pub enum EmailError {
    /// The provider refused or failed to deliver.
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    /// A sender or recipient address, or the provider settings, are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Delivers one HTML email. No receipt is tracked.
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    /// Send `html` to `to` under `subject`.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError>;
}

/// Builds the sender named by `config.provider`.
pub fn create_sender(config: &EmailConfig) -> Result<Arc<dyn EmailSender>, EmailError> {
    let from = match &config.from_name {
        Some(name) => format!("{name} <{}>", config.from_address),
        None => config.from_address.clone(),
    };
    match config.provider.as_str() {
        "smtp" => Ok(Arc::new(SmtpSender::new(&config.smtp, &from)?)),
        "resend" => Ok(Arc::new(ResendSender::new(
            config.resend_api_key.clone(),
            from,
        ))),
        "log" => Ok(Arc::new(LogSender)),
        other => Err(EmailError::InvalidConfig(format!(
            "Unknown email provider: {other}"
        ))),
    }
}
