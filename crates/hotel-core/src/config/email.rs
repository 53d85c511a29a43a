//! Outbound email configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Email delivery configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Provider: `"smtp"`, `"resend"` or `"log"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Optional display name for the sender.
    #[serde(default)]
    pub from_name: Option<String>,
    /// Lifetime of a verification link in hours.
    #[serde(default = "default_link_ttl")]
    pub verification_ttl_hours: u64,
    /// SMTP relay settings, used when `provider = "smtp"`.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Resend API key, used when `provider = "resend"`.
    #[serde(default)]
    pub resend_api_key: String,
}

/// SMTP relay settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// Relay port. 465 uses implicit TLS, anything else STARTTLS.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Login user.
    #[serde(default)]
    pub username: Option<String>,
    /// Login password.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether to require TLS.
    #[serde(default = "default_true")]
    pub use_tls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            from_address: default_from_address(),
            from_name: None,
            verification_ttl_hours: default_link_ttl(),
            smtp: SmtpConfig::default(),
            resend_api_key: String::new(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            use_tls: default_true(),
        }
    }
}

impl EmailConfig {
    /// Checks the provider name and its required settings.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.provider.as_str() {
            "log" | "smtp" => Ok(()),
            "resend" if self.resend_api_key.is_empty() => Err(AppError::configuration(
                "email.resend_api_key is required for the resend provider",
            )),
            "resend" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown email provider: {other}"
            ))),
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("provider", &self.provider)
            .field("from_address", &self.from_address)
            .field("verification_ttl_hours", &self.verification_ttl_hours)
            .field("smtp", &self.smtp)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("use_tls", &self.use_tls)
            .finish_non_exhaustive()
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_from_address() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_link_ttl() -> u64 {
    24
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}
