//! Room domain entities.

pub mod model;
pub mod status;

pub use model::{NewRoom, Room, RoomDetailsUpdate};
pub use status::{Availability, CleaningStatus, RoomType};
