//! Sender for the Resend HTTP API.

use async_trait::async_trait;
use serde::Serialize;

use super::{EmailError, EmailSender};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Delivers through `POST https://api.resend.com/emails`.
#[derive(Clone)]
pub struct ResendSender {
    client: reqwest::Client,
    api_key: String,
    from: String,
}

impl std::fmt::Debug for ResendSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendSender")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl ResendSender {
    /// Creates a sender authenticating with `api_key`.
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for ResendSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&SendRequest {
                from: &self.from,
                to: [to],
                subject,
                html,
            })
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::SendFailed(format!("Resend returned {status}: {body}")));
        }
        Ok(())
    }
}
