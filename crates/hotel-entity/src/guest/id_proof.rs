//! Identity document kinds accepted at check-in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity document presented by a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "id_proof_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IdProofType {
    /// National identity card.
    AadharCard,
    /// Passport.
    Passport,
    /// Tax identity card.
    PanCard,
    /// Driving license.
    DrivingLicense,
}

impl IdProofType {
    /// Return the document kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AadharCard => "aadhar_card",
            Self::Passport => "passport",
            Self::PanCard => "pan_card",
            Self::DrivingLicense => "driving_license",
        }
    }
}

impl fmt::Display for IdProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IdProofType {
    type Err = hotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aadhar_card" => Ok(Self::AadharCard),
            "passport" => Ok(Self::Passport),
            "pan_card" => Ok(Self::PanCard),
            "driving_license" => Ok(Self::DrivingLicense),
            _ => Err(hotel_core::AppError::validation(format!(
                "Invalid id proof type: '{s}'"
            ))),
        }
    }
}
