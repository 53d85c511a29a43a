//! Reservation engine: booking, amendment, checkout and cancellation.
//!
//! The engine is the only writer of a room's availability flag.

pub mod engine;
pub mod error;
pub mod request;

pub use engine::ReservationEngine;
pub use error::ReservationError;
pub use request::{BookingRequest, CheckoutFlag, ReservationUpdateRequest};
