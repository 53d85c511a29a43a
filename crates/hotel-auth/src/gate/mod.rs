//! Role allow-list gate for privileged routes.

pub mod policy;

pub use policy::{AccessGate, AuthContext};

/// Header carrying the access token.
pub const TOKEN_HEADER: &str = "x-auth-token";
