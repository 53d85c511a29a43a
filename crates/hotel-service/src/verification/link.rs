//! Verification link tokens and signatures.
//!
//! A link carries `expires`, `hash`, `id` and `signature` query parameters.
//! The signature is HMAC-SHA256 over `expires ∥ hash ∥ id` with the shared
//! secret, base64 with the standard alphabet and padding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngExt;
use reqwest::Url;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use hotel_core::error::AppError;

use super::error::VerificationError;

type HmacSha256 = Hmac<Sha256>;

/// Length of the raw verification token.
pub const TOKEN_LENGTH: usize = 20;

/// Path the confirmation endpoint is mounted on.
pub const CONFIRM_PATH: &str = "/guest/verify-email/confirm";

/// A freshly issued link and the secret behind it.
#[derive(Debug, Clone)]
pub struct VerificationLink {
    /// Raw token, persisted in the verification record.
    pub token: String,
    /// `hex(SHA256(token))`, carried in the link.
    pub hash: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
    /// Base64 HMAC over the link parameters.
    pub signature: String,
    /// The full URL sent to the guest.
    pub url: String,
}

/// Signs and checks verification links with the process-wide secret.
#[derive(Clone)]
pub struct LinkSigner {
    secret: Vec<u8>,
    base_url: String,
    ttl: Duration,
}

impl std::fmt::Debug for LinkSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkSigner")
            .field("base_url", &self.base_url)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl LinkSigner {
    /// Creates a signer. `base_url` is the public origin of the API.
    pub fn new(secret: &str, base_url: &str, ttl_hours: u64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    /// Generates a random token from `[a-zA-Z0-9]`.
    pub fn generate_token() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::rng();
        (0..TOKEN_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }

    /// Lowercase hex SHA-256 of the token.
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    fn mac(
        &self,
        expires: &str,
        hash: &str,
        guest_id: &str,
    ) -> Result<HmacSha256, VerificationError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::internal(format!("Invalid signing key: {e}")))?;
        mac.update(expires.as_bytes());
        mac.update(hash.as_bytes());
        mac.update(guest_id.as_bytes());
        Ok(mac)
    }

    /// Signs the link parameters exactly as they appear in the query.
    pub fn sign(
        &self,
        expires: &str,
        hash: &str,
        guest_id: &str,
    ) -> Result<String, VerificationError> {
        let mac = self.mac(expires, hash, guest_id)?;
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Checks a presented signature in constant time.
    pub fn verify(
        &self,
        expires: &str,
        hash: &str,
        guest_id: &str,
        signature: &str,
    ) -> Result<(), VerificationError> {
        let presented = STANDARD
            .decode(signature)
            .map_err(|_| VerificationError::InvalidSignature)?;
        self.mac(expires, hash, guest_id)?
            .verify_slice(&presented)
            .map_err(|_| VerificationError::InvalidSignature)
    }

    /// Issues a new link for `guest_id`, expiring after the configured TTL.
    pub fn issue(&self, guest_id: Uuid) -> Result<VerificationLink, VerificationError> {
        let token = Self::generate_token();
        let hash = Self::hash_token(&token);
        let expires_at = (Utc::now() + self.ttl).timestamp();
        let expires = expires_at.to_string();
        let id = guest_id.to_string();
        let signature = self.sign(&expires, &hash, &id)?;

        let url = Url::parse_with_params(
            &format!("{}{CONFIRM_PATH}", self.base_url),
            &[
                ("expires", expires.as_str()),
                ("hash", hash.as_str()),
                ("id", id.as_str()),
                ("signature", signature.as_str()),
            ],
        )
        .map_err(|e| AppError::configuration(format!("Invalid public url: {e}")))?;

        Ok(VerificationLink {
            token,
            hash,
            expires_at,
            signature,
            url: url.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> LinkSigner {
        LinkSigner::new("test-secret", "http://localhost:8000/", 24)
    }

    #[test]
    fn test_token_shape() {
        let token = LinkSigner::generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = LinkSigner::hash_token("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_issue_then_verify() {
        let signer = signer();
        let guest_id = Uuid::new_v4();
        let link = signer.issue(guest_id).unwrap();

        assert!(link.url.starts_with("http://localhost:8000/guest/verify-email/confirm?"));
        assert!(link.url.contains(&format!("id={guest_id}")));
        assert_eq!(link.hash, LinkSigner::hash_token(&link.token));

        signer
            .verify(
                &link.expires_at.to_string(),
                &link.hash,
                &guest_id.to_string(),
                &link.signature,
            )
            .unwrap();
    }

    #[test]
    fn test_tampered_parameters_fail() {
        let signer = signer();
        let guest_id = Uuid::new_v4().to_string();
        let signature = signer.sign("1700000000", "abcd", &guest_id).unwrap();

        let cases = [
            ("1700000001", "abcd", guest_id.clone()),
            ("1700000000", "abce", guest_id.clone()),
            ("1700000000", "abcd", Uuid::new_v4().to_string()),
        ];
        for (expires, hash, id) in cases {
            assert!(matches!(
                signer.verify(expires, hash, &id, &signature),
                Err(VerificationError::InvalidSignature)
            ));
        }
    }

    #[test]
    fn test_foreign_secret_and_garbage_rejected() {
        let other = LinkSigner::new("other-secret", "http://localhost:8000", 24);
        let signature = other.sign("1", "h", "g").unwrap();
        assert!(signer().verify("1", "h", "g", &signature).is_err());
        assert!(signer().verify("1", "h", "g", "not base64!").is_err());
    }

    #[test]
    fn test_signature_is_percent_encoded_in_url() {
        let signer = signer();
        let link = signer.issue(Uuid::new_v4()).unwrap();
        let parsed = Url::parse(&link.url).unwrap();
        let signature = parsed
            .query_pairs()
            .find(|(k, _)| k == "signature")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(signature, link.signature);
    }
}
