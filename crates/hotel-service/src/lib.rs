//! # hotel-service
//!
//! Business logic for the hotel backend. Services receive their stores and
//! collaborators through constructors and are shared behind `Arc`.
//!
//! ## Modules
//!
//! - `account`: staff and guest login, guest signup
//! - `verification`: signed, single-use email verification links
//! - `room`: room creation and details maintenance
//! - `reservation`: the booking engine that owns room availability

pub mod account;
pub mod reservation;
pub mod room;
pub mod verification;

pub use account::AccountService;
pub use reservation::ReservationEngine;
pub use room::RoomService;
pub use verification::EmailVerificationService;
