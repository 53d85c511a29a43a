//! # hotel-api
//!
//! HTTP API layer for the hotel backend built on Axum.
//!
//! Provides the REST endpoints, the role gate and timeout middleware,
//! request logging, CORS, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
