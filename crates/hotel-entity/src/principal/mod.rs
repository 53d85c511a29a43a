//! Authenticated principals: admins, managers, guests and drivers.

pub mod access;
pub mod model;

pub use access::AccessType;
pub use model::{NewPrincipal, Principal, PrincipalRef};
