//! Reservation failures.

use thiserror::Error;

use hotel_core::error::{AppError, ErrorKind};

/// Why a reservation operation was rejected.
#[derive(Debug, Error)]
pub enum ReservationError {
    /// A required field is missing or out of range.
    #[error("{0}")]
    Validation(String),

    #[error("Can't find room with id")]
    RoomNotFound,

    #[error("Can't find reservation with id")]
    ReservationNotFound,

    #[error("Room already occupied by guest.")]
    RoomOccupied,

    #[error("Room capacity exceeded.")]
    CapacityExceeded,

    #[error("Deposit ammout exceeded.")]
    DepositExceedsPrice,

    #[error("User has been already checked out.")]
    AlreadyCheckedOut,

    /// The booking did not finish within its time budget.
    #[error("Booking timed out")]
    Timeout,

    /// A multi-step write failed and was compensated.
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl ReservationError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        let kind = match err {
            ReservationError::Store(inner) => return inner,
            ReservationError::Validation(_)
            | ReservationError::CapacityExceeded
            | ReservationError::DepositExceedsPrice => ErrorKind::Validation,
            ReservationError::RoomNotFound | ReservationError::ReservationNotFound => {
                ErrorKind::NotFound
            }
            ReservationError::RoomOccupied | ReservationError::AlreadyCheckedOut => {
                ErrorKind::Conflict
            }
            ReservationError::Timeout => ErrorKind::Timeout,
            ReservationError::Internal(_) => ErrorKind::Internal,
        };
        AppError::new(kind, err.to_string())
    }
}
