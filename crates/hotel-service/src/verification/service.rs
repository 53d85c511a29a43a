//! Email verification service: issue, resend and confirm links.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use hotel_database::store::{GuestStore, VerificationStore};
use hotel_entity::verification::EmailVerification;
use hotel_mail::EmailSender;

use super::error::VerificationError;
use super::link::LinkSigner;
use super::template;

/// Issues signed, single-use verification links and confirms them.
///
/// At most one pending verification exists per guest; issuing a new link
/// replaces the previous record, which invalidates older links through the
/// hash check.
#[derive(Clone)]
pub struct EmailVerificationService {
    signer: LinkSigner,
    guests: Arc<dyn GuestStore>,
    verifications: Arc<dyn VerificationStore>,
    sender: Arc<dyn EmailSender>,
}

impl std::fmt::Debug for EmailVerificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailVerificationService")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl EmailVerificationService {
    /// Creates a new verification service.
    pub fn new(
        signer: LinkSigner,
        guests: Arc<dyn GuestStore>,
        verifications: Arc<dyn VerificationStore>,
        sender: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            signer,
            guests,
            verifications,
            sender,
        }
    }

    /// Persists a fresh verification record and emails the link.
    ///
    /// A delivery failure leaves the record in place; the guest can ask for
    /// a new link with [`Self::resend`].
    pub async fn generate_verification_link(
        &self,
        guest_id: Uuid,
        email: &str,
    ) -> Result<(), VerificationError> {
        let link = self.signer.issue(guest_id)?;

        let record = EmailVerification::new(guest_id, link.token.clone(), link.expires_at);
        self.verifications.upsert_verification(&record).await?;

        let html = template::render(email, &link.url);
        if let Err(e) = self.sender.send(email, template::SUBJECT, &html).await {
            warn!(guest_id = %guest_id, error = %e, "Verification email not delivered");
            return Err(VerificationError::DeliveryError(e.to_string()));
        }

        info!(guest_id = %guest_id, expires_at = link.expires_at, "Verification link sent");
        Ok(())
    }

    /// Re-issues the link for an unverified guest, replacing any pending one.
    pub async fn resend(&self, email: &str) -> Result<(), VerificationError> {
        let guest = self
            .guests
            .find_guest_by_email(email)
            .await?
            .ok_or(VerificationError::LookupError)?;
        if guest.is_verified {
            return Err(VerificationError::AlreadyVerified);
        }
        self.generate_verification_link(guest.guest_id, &guest.email)
            .await
    }

    /// Confirms a link and marks the guest verified.
    ///
    /// Checks run in order: parameters present, expiry, signature, guest,
    /// verified flag, pending record, token hash. The signature is checked
    /// before any store access.
    pub async fn verify_email(
        &self,
        expires: &str,
        hash: &str,
        guest_id: &str,
        signature: &str,
    ) -> Result<Uuid, VerificationError> {
        if [expires, hash, guest_id, signature]
            .iter()
            .any(|p| p.is_empty())
        {
            return Err(VerificationError::MalformedLink);
        }

        let expires_at: i64 = expires
            .parse()
            .map_err(|_| VerificationError::MalformedLink)?;
        if expires_at < Utc::now().timestamp() {
            return Err(VerificationError::LinkExpired);
        }

        self.signer.verify(expires, hash, guest_id, signature)?;

        let guest_id: Uuid = guest_id.parse().map_err(|_| VerificationError::LookupError)?;
        let guest = self
            .guests
            .find_guest(guest_id)
            .await?
            .ok_or(VerificationError::LookupError)?;
        if guest.is_verified {
            return Err(VerificationError::AlreadyVerified);
        }

        let record = self
            .verifications
            .find_verification(guest_id)
            .await?
            .ok_or(VerificationError::NoPendingVerification)?;
        if LinkSigner::hash_token(&record.token) != hash {
            warn!(guest_id = %guest_id, "Verification hash mismatch");
            return Err(VerificationError::HashMismatch);
        }

        self.guests.mark_guest_verified(guest_id).await?;
        if let Err(e) = self.verifications.delete_verification(guest_id).await {
            warn!(guest_id = %guest_id, error = %e, "Guest verified but record not removed");
            return Err(VerificationError::PartialVerification);
        }

        info!(guest_id = %guest_id, "Guest email verified");
        Ok(guest_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hotel_core::result::AppResult;
    use hotel_core::AppError;
    use hotel_database::MemoryStore;
    use hotel_entity::guest::{Guest, NewGuest};
    use hotel_mail::MemorySender;
    use reqwest::Url;

    const SECRET: &str = "verification-test-secret";

    fn signer() -> LinkSigner {
        LinkSigner::new(SECRET, "http://localhost:8000", 24)
    }

    fn service(store: &MemoryStore, sender: &MemorySender) -> EmailVerificationService {
        EmailVerificationService::new(
            signer(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(sender.clone()),
        )
    }

    async fn seed_guest(store: &MemoryStore) -> Guest {
        let guest = Guest::from_new(NewGuest {
            email: "guest@example.com".into(),
            first_name: "Grace".into(),
            last_name: "H".into(),
            password_hash: "hash".into(),
            phone: None,
            gender: None,
            country: None,
            id_proof_type: None,
        });
        store.insert_guest(&guest).await.unwrap();
        guest
    }

    /// Pulls the four query parameters out of the last email's link.
    async fn last_link(sender: &MemorySender) -> (String, String, String, String) {
        let html = sender.last().await.unwrap().html;
        let start = html.find("href=\"").unwrap() + 6;
        let end = html[start..].find('"').unwrap() + start;
        let url = Url::parse(&html[start..end].replace("&amp;", "&")).unwrap();
        let param = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
                .unwrap()
        };
        (param("expires"), param("hash"), param("id"), param("signature"))
    }

    #[tokio::test]
    async fn test_signup_link_verifies_once() {
        let store = MemoryStore::new();
        let sender = MemorySender::new();
        let svc = service(&store, &sender);
        let guest = seed_guest(&store).await;

        svc.generate_verification_link(guest.guest_id, &guest.email)
            .await
            .unwrap();
        let sent = sender.last().await.unwrap();
        assert_eq!(sent.to, "guest@example.com");
        assert_eq!(sent.subject, "Email verification");

        let (expires, hash, id, signature) = last_link(&sender).await;
        let verified = svc.verify_email(&expires, &hash, &id, &signature).await.unwrap();
        assert_eq!(verified, guest.guest_id);
        assert!(store.find_guest(guest.guest_id).await.unwrap().unwrap().is_verified);
        assert!(store.find_verification(guest.guest_id).await.unwrap().is_none());

        let replay = svc.verify_email(&expires, &hash, &id, &signature).await;
        assert!(matches!(replay, Err(VerificationError::AlreadyVerified)));
    }

    #[tokio::test]
    async fn test_tampered_link_rejected() {
        let store = MemoryStore::new();
        let sender = MemorySender::new();
        let svc = service(&store, &sender);
        let guest = seed_guest(&store).await;
        svc.generate_verification_link(guest.guest_id, &guest.email)
            .await
            .unwrap();
        let (expires, hash, id, signature) = last_link(&sender).await;

        let later = (expires.parse::<i64>().unwrap() + 60).to_string();
        let other_id = Uuid::new_v4().to_string();
        for (e, h, i) in [
            (later.as_str(), hash.as_str(), id.as_str()),
            (expires.as_str(), "deadbeef", id.as_str()),
            (expires.as_str(), hash.as_str(), other_id.as_str()),
        ] {
            let result = svc.verify_email(e, h, i, &signature).await;
            assert!(matches!(result, Err(VerificationError::InvalidSignature)));
        }
        assert!(!store.find_guest(guest.guest_id).await.unwrap().unwrap().is_verified);
    }

    #[tokio::test]
    async fn test_expired_link_rejected_despite_valid_signature() {
        let store = MemoryStore::new();
        let svc = service(&store, &MemorySender::new());
        let guest = seed_guest(&store).await;

        let expires = (Utc::now().timestamp() - 10).to_string();
        let id = guest.guest_id.to_string();
        let signature = signer().sign(&expires, "abc", &id).unwrap();

        let result = svc.verify_email(&expires, "abc", &id, &signature).await;
        assert!(matches!(result, Err(VerificationError::LinkExpired)));
    }

    #[tokio::test]
    async fn test_malformed_parameters() {
        let store = MemoryStore::new();
        let svc = service(&store, &MemorySender::new());

        let empty = svc.verify_email("", "h", "id", "sig").await;
        assert!(matches!(empty, Err(VerificationError::MalformedLink)));

        let not_a_number = svc.verify_email("soon", "h", "id", "sig").await;
        assert!(matches!(not_a_number, Err(VerificationError::MalformedLink)));
    }

    #[tokio::test]
    async fn test_signed_link_without_record_or_guest() {
        let store = MemoryStore::new();
        let svc = service(&store, &MemorySender::new());
        let guest = seed_guest(&store).await;
        let expires = (Utc::now().timestamp() + 600).to_string();

        let id = guest.guest_id.to_string();
        let signature = signer().sign(&expires, "abc", &id).unwrap();
        let result = svc.verify_email(&expires, "abc", &id, &signature).await;
        assert!(matches!(result, Err(VerificationError::NoPendingVerification)));

        let unknown = Uuid::new_v4().to_string();
        let signature = signer().sign(&expires, "abc", &unknown).unwrap();
        let result = svc.verify_email(&expires, "abc", &unknown, &signature).await;
        assert!(matches!(result, Err(VerificationError::LookupError)));
    }

    #[tokio::test]
    async fn test_superseded_link_is_hash_mismatch() {
        let store = MemoryStore::new();
        let sender = MemorySender::new();
        let svc = service(&store, &sender);
        let guest = seed_guest(&store).await;

        svc.generate_verification_link(guest.guest_id, &guest.email)
            .await
            .unwrap();
        let (expires, hash, id, signature) = last_link(&sender).await;
        svc.resend(&guest.email).await.unwrap();

        let result = svc.verify_email(&expires, &hash, &id, &signature).await;
        assert!(matches!(result, Err(VerificationError::HashMismatch)));

        let (expires, hash, id, signature) = last_link(&sender).await;
        svc.verify_email(&expires, &hash, &id, &signature).await.unwrap();
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_record() {
        let store = MemoryStore::new();
        let sender = MemorySender::new();
        sender.set_failing(true).await;
        let svc = service(&store, &sender);
        let guest = seed_guest(&store).await;

        let result = svc.generate_verification_link(guest.guest_id, &guest.email).await;
        assert!(matches!(result, Err(VerificationError::DeliveryError(_))));
        assert!(store.find_verification(guest.guest_id).await.unwrap().is_some());
        assert!(store.find_guest(guest.guest_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resend_rejects_verified_and_unknown() {
        let store = MemoryStore::new();
        let svc = service(&store, &MemorySender::new());
        let guest = seed_guest(&store).await;

        assert!(matches!(
            svc.resend("nobody@example.com").await,
            Err(VerificationError::LookupError)
        ));

        store.mark_guest_verified(guest.guest_id).await.unwrap();
        assert!(matches!(
            svc.resend(&guest.email).await,
            Err(VerificationError::AlreadyVerified)
        ));
    }

    /// Verification store whose deletes always fail.
    struct StuckRecords(MemoryStore);

    #[async_trait]
    impl VerificationStore for StuckRecords {
        async fn upsert_verification(&self, record: &EmailVerification) -> AppResult<()> {
            self.0.upsert_verification(record).await
        }

        async fn find_verification(&self, guest_id: Uuid) -> AppResult<Option<EmailVerification>> {
            self.0.find_verification(guest_id).await
        }

        async fn delete_verification(&self, _guest_id: Uuid) -> AppResult<bool> {
            Err(AppError::database("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_delete_failure_is_partial_verification() {
        let store = MemoryStore::new();
        let sender = MemorySender::new();
        let svc = EmailVerificationService::new(
            signer(),
            Arc::new(store.clone()),
            Arc::new(StuckRecords(store.clone())),
            Arc::new(sender.clone()),
        );
        let guest = seed_guest(&store).await;
        svc.generate_verification_link(guest.guest_id, &guest.email)
            .await
            .unwrap();
        let (expires, hash, id, signature) = last_link(&sender).await;

        let result = svc.verify_email(&expires, &hash, &id, &signature).await;
        assert!(matches!(result, Err(VerificationError::PartialVerification)));
        assert!(store.find_guest(guest.guest_id).await.unwrap().unwrap().is_verified);
    }
}
