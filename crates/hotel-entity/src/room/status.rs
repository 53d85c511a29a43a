//! Room type, availability and housekeeping enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bed configuration of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// One bed.
    Single,
    /// Two beds or one double bed.
    Double,
    /// Suite.
    Suite,
}

impl RoomType {
    /// Return the room type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Suite => "suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = hotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "suite" => Ok(Self::Suite),
            _ => Err(hotel_core::AppError::validation(format!(
                "Invalid room type: '{s}'. Expected one of: single, double, suite"
            ))),
        }
    }
}

/// Whether a room currently has an active reservation.
///
/// Only the reservation engine writes this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_availability", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// No active reservation.
    Available,
    /// Held by an active reservation.
    Occupied,
}

impl Availability {
    /// Return the availability as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Housekeeping state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "cleaning_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CleaningStatus {
    /// Ready for the next guest.
    Cleaned,
    /// Needs cleaning.
    Dirty,
    /// Being cleaned.
    InProgress,
}

impl CleaningStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::Dirty => "dirty",
            Self::InProgress => "in_progress",
        }
    }
}

impl fmt::Display for CleaningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CleaningStatus {
    type Err = hotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cleaned" => Ok(Self::Cleaned),
            "dirty" => Ok(Self::Dirty),
            "in_progress" => Ok(Self::InProgress),
            _ => Err(hotel_core::AppError::validation(format!(
                "Invalid cleaning status: '{s}'. Expected one of: cleaned, dirty, in_progress"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&CleaningStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&Availability::Occupied).unwrap(),
            "\"occupied\""
        );
        assert_eq!("suite".parse::<RoomType>().unwrap(), RoomType::Suite);
        assert!("single_bad".parse::<RoomType>().is_err());
    }
}
