//! Email verification records.

pub mod model;

pub use model::EmailVerification;
