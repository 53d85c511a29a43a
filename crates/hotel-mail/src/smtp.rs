//! SMTP sender built on lettre's async transport.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, SinglePart, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use hotel_core::config::SmtpConfig;

use super::{EmailError, EmailSender};

/// Delivers through an SMTP relay.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSender")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpSender {
    /// Builds the transport. Port 465 uses implicit TLS, other ports STARTTLS.
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, EmailError> {
        let from: Mailbox = from
            .parse()
            .map_err(|e| EmailError::InvalidConfig(format!("Invalid from address: {e}")))?;
        let host = config.host.as_str();

        let mut builder = if config.use_tls {
            let tls = TlsParameters::new(host.to_string()).map_err(|e| {
                EmailError::InvalidConfig(format!("TLS configuration error: {e}"))
            })?;
            if config.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| EmailError::InvalidConfig(format!("SMTP relay error: {e}")))?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| EmailError::InvalidConfig(format!("SMTP relay error: {e}")))?
                    .port(config.port)
                    .tls(Tls::Required(tls))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(config.port)
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailSender for SmtpSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| EmailError::InvalidConfig(format!("Invalid to address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(html.to_string()),
            )
            .map_err(|e| EmailError::SendFailed(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(host: &str) -> SmtpConfig {
        SmtpConfig {
            host: host.to_string(),
            port: 25,
            username: None,
            password: None,
            use_tls: false,
        }
    }

    // The transport pool must be dropped inside a Tokio runtime.
    #[tokio::test]
    async fn test_sender_without_tls() {
        let sender = SmtpSender::new(&plain("localhost"), "onboarding@resend.dev").unwrap();
        assert_eq!(sender.from.to_string(), "onboarding@resend.dev");
    }

    #[test]
    fn test_bad_from_address() {
        assert!(matches!(
            SmtpSender::new(&plain("localhost"), "not an address"),
            Err(EmailError::InvalidConfig(_))
        ));
    }
}
