//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hotel_auth::{PasswordHasher, TokenService};
use hotel_core::config::AppConfig;
use hotel_database::Stores;
use hotel_mail::EmailSender;
use hotel_service::verification::LinkSigner;
use hotel_service::{AccountService, EmailVerificationService, ReservationEngine, RoomService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Token issue and validation
    pub tokens: Arc<TokenService>,

    // ── Services ─────────────────────────────────────────────
    /// Login, signup and guest lookups
    pub accounts: Arc<AccountService>,
    /// Email verification links
    pub verification: Arc<EmailVerificationService>,
    /// Room maintenance
    pub rooms: Arc<RoomService>,
    /// Booking engine
    pub reservations: Arc<ReservationEngine>,
}

impl AppState {
    /// Wires every service from configuration, stores and a mail sender.
    pub fn new(config: AppConfig, stores: Stores, sender: Arc<dyn EmailSender>) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.auth,
            Arc::clone(&stores.principals),
        ));

        let signer = LinkSigner::new(
            &config.auth.secret_key,
            &config.server.public_url,
            config.email.verification_ttl_hours,
        );
        let verification = Arc::new(EmailVerificationService::new(
            signer,
            Arc::clone(&stores.guests),
            Arc::clone(&stores.verifications),
            sender,
        ));

        let accounts = Arc::new(AccountService::new(
            Arc::clone(&stores.principals),
            Arc::clone(&stores.guests),
            Arc::clone(&tokens),
            PasswordHasher::new(&config.auth),
            Arc::clone(&verification),
        ));

        let rooms = Arc::new(RoomService::new(Arc::clone(&stores.rooms)));
        let reservations = Arc::new(ReservationEngine::new(
            Arc::clone(&stores.rooms),
            Arc::clone(&stores.reservations),
            &config.reservation,
        ));

        Self {
            config: Arc::new(config),
            tokens,
            accounts,
            verification,
            rooms,
            reservations,
        }
    }
}
