//! Guest domain entities.

pub mod id_proof;
pub mod model;

pub use id_proof::IdProofType;
pub use model::{Guest, NewGuest};
