//! PostgreSQL implementations of the store traits.

pub mod guest;
pub mod principal;
pub mod reservation;
pub mod room;
pub mod verification;

pub use guest::GuestRepository;
pub use principal::PrincipalRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use verification::VerificationRepository;

use hotel_core::error::{AppError, ErrorKind};

/// Maps a sqlx error, turning unique violations into conflicts.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate entry"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
