//! Verification failures.

use thiserror::Error;

use hotel_core::error::{AppError, ErrorKind};

/// Why issuing or confirming a verification link failed.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// A query parameter is empty or unparsable.
    #[error("invalid verification link")]
    MalformedLink,

    /// The link's expiry is in the past.
    #[error("link is expired")]
    LinkExpired,

    /// The signature does not match the other parameters.
    #[error("signature is not valid")]
    InvalidSignature,

    /// The guest named by the link does not exist.
    #[error("error while getting data, can't verify user")]
    LookupError,

    /// The guest is already verified.
    #[error("user already verified")]
    AlreadyVerified,

    /// No pending verification exists for the guest.
    #[error("can't find verification details with id")]
    NoPendingVerification,

    /// The link's hash does not match the stored secret.
    #[error("invalid hash")]
    HashMismatch,

    /// The guest was marked verified but the record could not be removed.
    #[error("guest verified but the verification record could not be removed")]
    PartialVerification,

    /// The email could not be delivered.
    #[error("failed to send verification email: {0}")]
    DeliveryError(String),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<VerificationError> for AppError {
    fn from(err: VerificationError) -> Self {
        let kind = match err {
            VerificationError::Store(inner) => return inner,
            VerificationError::MalformedLink
            | VerificationError::LinkExpired
            | VerificationError::InvalidSignature
            | VerificationError::HashMismatch => ErrorKind::Validation,
            VerificationError::LookupError | VerificationError::NoPendingVerification => {
                ErrorKind::NotFound
            }
            VerificationError::AlreadyVerified => ErrorKind::Conflict,
            VerificationError::PartialVerification => ErrorKind::Internal,
            VerificationError::DeliveryError(_) => ErrorKind::ExternalService,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
