//! Access type (role) enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four principal kinds. Each kind lives in its own table and is
/// addressed by its own identifier column.
///
/// There is no ordering between kinds: an admin is not implicitly a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Chain administrator.
    Admin,
    /// Branch manager.
    Manager,
    /// Hotel guest.
    Guest,
    /// Pickup driver.
    Driver,
}

impl AccessType {
    /// All kinds, in declaration order.
    pub const ALL: [AccessType; 4] = [Self::Admin, Self::Manager, Self::Guest, Self::Driver];

    /// Return the access type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Guest => "guest",
            Self::Driver => "driver",
        }
    }

    /// Table holding principals of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Admin => "admins",
            Self::Manager => "managers",
            Self::Guest => "guests",
            Self::Driver => "drivers",
        }
    }

    /// Identifier column of this kind's table.
    pub fn id_column(&self) -> &'static str {
        match self {
            Self::Admin => "admin_id",
            Self::Manager => "manager_id",
            Self::Guest => "guest_id",
            Self::Driver => "driver_id",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = hotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "guest" => Ok(Self::Guest),
            "driver" => Ok(Self::Driver),
            _ => Err(hotel_core::AppError::validation(format!(
                "Invalid access type: '{s}'. Expected one of: admin, manager, guest, driver"
            ))),
        }
    }
}
