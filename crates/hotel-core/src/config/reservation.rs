//! Booking configuration.

use serde::{Deserialize, Serialize};

/// Reservation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// Wall-clock budget for a booking, in seconds. Booking chains several
    /// sequential writes so it gets more time than ordinary requests.
    #[serde(default = "default_booking_timeout")]
    pub booking_timeout_seconds: u64,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            booking_timeout_seconds: default_booking_timeout(),
        }
    }
}

fn default_booking_timeout() -> u64 {
    100
}
