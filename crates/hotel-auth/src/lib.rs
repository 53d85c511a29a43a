//! # hotel-auth
//!
//! Authentication and authorization for the hotel backend.
//!
//! ## Modules
//!
//! - `jwt`: token claims, signing and validation
//! - `token`: the token service: issue, validate and persist per principal
//! - `gate`: role allow-list check behind the `X-Auth-Token` header
//! - `password`: Argon2id password hashing

pub mod error;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use gate::{AccessGate, AuthContext};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use token::TokenService;
