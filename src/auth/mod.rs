//! Token-issuing (auth) service.
//!
//! Owns the single process-wide secret token and exposes it over GraphQL
//! for reading (`token`) and rotation (`newToken`). Rotation invalidates
//! the previous value immediately; no grace period is offered.

/// Service configuration.
pub mod config;

/// GraphQL schema and resolvers.
pub mod schema;

/// Secret storage.
pub mod state;

pub use config::AuthConfig;
pub use schema::{build_schema, AuthSchema};
pub use state::SecretStore;
