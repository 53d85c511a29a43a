//! Email verification handshake.

pub mod error;
pub mod link;
pub mod service;
pub mod template;

pub use error::VerificationError;
pub use link::{LinkSigner, VerificationLink};
pub use service::EmailVerificationService;
