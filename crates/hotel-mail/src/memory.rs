//! Sender that keeps messages in memory, for tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{EmailError, EmailSender};

/// One captured message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

#[derive(Debug, Default)]
struct Outbox {
    sent: Vec<SentEmail>,
    failing: bool,
}

/// Records every message; can be switched to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemorySender {
    outbox: Arc<Mutex<Outbox>>,
}

impl MemorySender {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent sends fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        self.outbox.lock().await.failing = failing;
    }

    /// Messages captured so far, oldest first.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().await.sent.clone()
    }

    /// The most recent message.
    pub async fn last(&self) -> Option<SentEmail> {
        self.outbox.lock().await.sent.last().cloned()
    }
}

#[async_trait]
impl EmailSender for MemorySender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let mut outbox = self.outbox.lock().await;
        if outbox.failing {
            return Err(EmailError::SendFailed("relay unavailable".to_string()));
        }
        outbox.sent.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}
