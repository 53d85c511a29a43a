//! Booking and amendment requests.
//!
//! Every field is optional on the wire so a missing one yields a specific
//! message rather than a deserialization failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use hotel_entity::reservation::ReservationChanges;

use super::error::ReservationError;

/// Request to book a room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub room_id: Option<Uuid>,
    pub guest_id: Option<Uuid>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub deposit_amount: Option<f64>,
    pub numbers_of_guests: Option<i32>,
}

/// Checked booking parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Booking {
    pub room_id: Uuid,
    pub guest_id: Uuid,
    pub stay: Stay,
}

/// Stay parameters shared by booking and amendment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stay {
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: DateTime<Utc>,
    pub deposit_amount: f64,
    pub numbers_of_guests: i32,
}

impl Stay {
    fn parse(
        check_in_time: Option<DateTime<Utc>>,
        check_out_time: Option<DateTime<Utc>>,
        deposit_amount: Option<f64>,
        numbers_of_guests: Option<i32>,
    ) -> Result<Self, ReservationError> {
        let check_in_time =
            check_in_time.ok_or_else(|| ReservationError::validation("Check in time is required"))?;
        let check_out_time = check_out_time
            .ok_or_else(|| ReservationError::validation("Check out time is required"))?;
        let deposit_amount = deposit_amount
            .ok_or_else(|| ReservationError::validation("Deposit amount is required"))?;
        let numbers_of_guests = numbers_of_guests
            .ok_or_else(|| ReservationError::validation("Number of guest is required"))?;

        if numbers_of_guests <= 0 {
            return Err(ReservationError::validation(
                "Number of guest is not less or equal 0",
            ));
        }
        if !deposit_amount.is_finite() || deposit_amount <= 0.0 {
            return Err(ReservationError::validation(
                "Deposit amount must be greater than 0",
            ));
        }
        if check_out_time <= check_in_time {
            return Err(ReservationError::validation(
                "Check out time must be after check in time",
            ));
        }

        Ok(Self {
            check_in_time,
            check_out_time,
            deposit_amount,
            numbers_of_guests,
        })
    }

    /// Capacity and deposit rules against a room.
    pub fn check_room(&self, capacity: i32, price: f64) -> Result<(), ReservationError> {
        if self.numbers_of_guests > capacity {
            return Err(ReservationError::CapacityExceeded);
        }
        if self.deposit_amount > price {
            return Err(ReservationError::DepositExceedsPrice);
        }
        Ok(())
    }

    /// Mutable fields with `pending_amount` derived from `price`.
    pub fn changes(&self, price: f64, is_checked_out: bool) -> ReservationChanges {
        ReservationChanges {
            check_in_time: self.check_in_time,
            check_out_time: self.check_out_time,
            deposit_amount: self.deposit_amount,
            pending_amount: price - self.deposit_amount,
            numbers_of_guests: self.numbers_of_guests,
            is_checked_out,
        }
    }
}

impl BookingRequest {
    pub(crate) fn parse(&self) -> Result<Booking, ReservationError> {
        let room_id = self
            .room_id
            .ok_or_else(|| ReservationError::validation("Room id is required"))?;
        let guest_id = self
            .guest_id
            .ok_or_else(|| ReservationError::validation("Guest id is required"))?;
        let stay = Stay::parse(
            self.check_in_time,
            self.check_out_time,
            self.deposit_amount,
            self.numbers_of_guests,
        )?;
        Ok(Booking {
            room_id,
            guest_id,
            stay,
        })
    }
}

/// Checkout flag as sent by clients: a JSON boolean or the exact strings
/// `"true"` / `"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CheckoutFlag {
    Bool(bool),
    Text(String),
}

impl CheckoutFlag {
    fn parse(&self) -> Result<bool, ReservationError> {
        match self {
            Self::Bool(value) => Ok(*value),
            Self::Text(text) if text == "true" => Ok(true),
            Self::Text(text) if text == "false" => Ok(false),
            Self::Text(_) => Err(ReservationError::validation(
                "Is check out must be true or false",
            )),
        }
    }
}

/// Full replacement of a reservation's mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationUpdateRequest {
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub deposit_amount: Option<f64>,
    pub numbers_of_guests: Option<i32>,
    pub is_checked_out: Option<CheckoutFlag>,
}

impl ReservationUpdateRequest {
    pub(crate) fn parse(&self) -> Result<(Stay, bool), ReservationError> {
        let stay = Stay::parse(
            self.check_in_time,
            self.check_out_time,
            self.deposit_amount,
            self.numbers_of_guests,
        )?;
        let checked_out = self
            .is_checked_out
            .as_ref()
            .ok_or_else(|| ReservationError::validation("Is check out is required"))?
            .parse()?;
        Ok((stay, checked_out))
    }
}
