//! Accounts: staff and guest login, guest signup, admin bootstrap.

pub mod service;

pub use service::{AccountService, GuestSignup, LoginOutcome};
