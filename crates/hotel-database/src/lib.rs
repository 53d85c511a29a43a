//! # hotel-database
//!
//! Persistence for the hotel backend: the store traits the services
//! depend on, PostgreSQL repositories implementing them, and an in-memory
//! store used by tests and the `memory` provider.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{GuestStore, PrincipalStore, ReservationStore, RoomStore, Stores, VerificationStore};
