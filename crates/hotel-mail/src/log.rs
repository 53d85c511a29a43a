//! Sender that only logs, for development.

use async_trait::async_trait;
use tracing::info;

use super::{EmailError, EmailSender};

/// Logs the recipient and subject instead of delivering.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

#[async_trait]
impl EmailSender for LogSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        info!(to = %to, subject = %subject, bytes = html.len(), "Email not delivered (log provider)");
        Ok(())
    }
}
