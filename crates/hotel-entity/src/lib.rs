//! # hotel-entity
//!
//! Domain entity models for the hotel backend. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod guest;
pub mod principal;
pub mod reservation;
pub mod room;
pub mod verification;
