//! Room inventory maintenance.

pub mod service;

pub use service::RoomService;
