//! Account service.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use hotel_auth::{PasswordHasher, TokenPair, TokenService};
use hotel_core::config::BootstrapAdmin;
use hotel_core::error::AppError;
use hotel_core::result::AppResult;
use hotel_database::store::{GuestStore, PrincipalStore};
use hotel_entity::guest::{Guest, IdProofType, NewGuest};
use hotel_entity::principal::{AccessType, NewPrincipal, Principal};

use crate::verification::EmailVerificationService;

/// Guest registration data, already shape-checked by the caller.
#[derive(Debug, Clone)]
pub struct GuestSignup {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub id_proof_type: Option<IdProofType>,
}

/// A successful login: the principal as stored plus the new token pair.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub principal: Principal,
    pub tokens: TokenPair,
}

/// Login, signup and account lookups for every principal kind.
#[derive(Clone)]
pub struct AccountService {
    principals: Arc<dyn PrincipalStore>,
    guests: Arc<dyn GuestStore>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
    verification: Arc<EmailVerificationService>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        guests: Arc<dyn GuestStore>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
        verification: Arc<EmailVerificationService>,
    ) -> Self {
        Self {
            principals,
            guests,
            tokens,
            hasher,
            verification,
        }
    }

    /// Authenticates a principal of `kind` and issues a persisted token pair.
    ///
    /// Unknown email is not-found, a wrong password or an unverified guest
    /// is a validation error.
    pub async fn login(
        &self,
        kind: AccessType,
        email: &str,
        password: &str,
    ) -> AppResult<LoginOutcome> {
        let mut principal = self
            .principals
            .find_principal_by_email(kind, email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Can't find {kind} with this email")))?;

        if !self
            .hasher
            .verify_password(password, &principal.password_hash)?
        {
            warn!(principal = %principal.reference(), "Rejected login: wrong password");
            return Err(AppError::validation("Invalid password"));
        }

        if kind == AccessType::Guest && !principal.is_verified {
            return Err(AppError::validation("Guest is not verified."));
        }

        let tokens = self.tokens.login(&principal).await?;
        principal.token = Some(tokens.token.clone());
        principal.refresh_token = Some(tokens.refresh_token.clone());

        info!(principal = %principal.reference(), "Login succeeded");
        Ok(LoginOutcome { principal, tokens })
    }

    /// Registers an unverified guest and emails a verification link.
    ///
    /// When the email cannot be delivered the guest is kept and the error is
    /// returned; the link can be re-sent later.
    pub async fn signup_guest(&self, signup: GuestSignup) -> AppResult<Guest> {
        if self
            .guests
            .find_guest_by_email(&signup.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email already in use by another user."));
        }

        let password_hash = self.hasher.hash_password(&signup.password)?;
        let guest = Guest::from_new(NewGuest {
            email: signup.email,
            first_name: signup.first_name,
            last_name: signup.last_name,
            password_hash,
            phone: signup.phone,
            gender: signup.gender,
            country: signup.country,
            id_proof_type: signup.id_proof_type,
        });
        self.guests.insert_guest(&guest).await?;
        info!(guest_id = %guest.guest_id, "Guest registered");

        self.verification
            .generate_verification_link(guest.guest_id, &guest.email)
            .await?;
        Ok(guest)
    }

    /// Re-sends the verification link for an unverified guest.
    pub async fn resend_verification(&self, email: &str) -> AppResult<()> {
        Ok(self.verification.resend(email).await?)
    }

    /// Fetches a guest profile.
    pub async fn get_guest(&self, guest_id: Uuid) -> AppResult<Guest> {
        self.guests
            .find_guest(guest_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find guest with id"))
    }

    /// Seeds the configured admin unless one with that email exists.
    ///
    /// Returns whether an admin was created.
    pub async fn bootstrap_admin(&self, admin: &BootstrapAdmin) -> AppResult<bool> {
        if self
            .principals
            .find_principal_by_email(AccessType::Admin, &admin.email)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let password_hash = self.hasher.hash_password(&admin.password)?;
        let principal = self
            .principals
            .insert_principal(NewPrincipal {
                access_type: AccessType::Admin,
                email: admin.email.clone(),
                first_name: admin.first_name.clone(),
                last_name: admin.last_name.clone(),
                password_hash,
            })
            .await?;
        info!(principal = %principal.reference(), "Bootstrap admin created");
        Ok(true)
    }
}
