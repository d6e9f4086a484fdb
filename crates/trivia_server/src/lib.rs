//! HTTP boundary for the trivia service.
//!
//! # Responsibility
//! - Parse typed request schemas and hand them to `trivia_core` services.
//! - Map tagged service outcomes onto HTTP statuses and JSON envelopes.
//!
//! # Invariants
//! - Handlers never panic; every failure becomes an `ApiError`.
//! - Each request runs on its own store connection.

pub mod config;
pub mod error;
pub mod payload;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use server::{build_router, TriviaServer};
pub use state::AppState;
