//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A guest's booking of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub reservation_id: Uuid,
    /// Booked room.
    pub room_id: Uuid,
    /// Booking guest.
    pub guest_id: Uuid,
    /// Arrival.
    pub check_in_time: DateTime<Utc>,
    /// Departure.
    pub check_out_time: DateTime<Utc>,
    /// Amount paid up front.
    pub deposit_amount: f64,
    /// Room price minus deposit.
    pub pending_amount: f64,
    /// Party size.
    pub numbers_of_guests: i32,
    /// Set once the guest has left; the reservation is frozen afterwards.
    pub is_checked_out: bool,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether the reservation still holds its room.
    pub fn is_active(&self) -> bool {
        !self.is_checked_out
    }
}

/// Mutable fields of a reservation, written together by the update path.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationChanges {
    /// Arrival.
    pub check_in_time: DateTime<Utc>,
    /// Departure.
    pub check_out_time: DateTime<Utc>,
    /// Amount paid up front.
    pub deposit_amount: f64,
    /// Recomputed balance.
    pub pending_amount: f64,
    /// Party size.
    pub numbers_of_guests: i32,
    /// Checkout flag.
    pub is_checked_out: bool,
}

impl ReservationChanges {
    /// Applies the changes to a reservation in place.
    pub fn apply(&self, reservation: &mut Reservation) {
        reservation.check_in_time = self.check_in_time;
        reservation.check_out_time = self.check_out_time;
        reservation.deposit_amount = self.deposit_amount;
        reservation.pending_amount = self.pending_amount;
        reservation.numbers_of_guests = self.numbers_of_guests;
        reservation.is_checked_out = self.is_checked_out;
        reservation.updated_at = Utc::now();
    }
}
