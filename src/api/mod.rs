//! Token-gated API service.
//!
//! Exposes a greeting query and a counter-rotating mutation. Every request
//! is authorized first by fetching the current secret from the auth service
//! and comparing it to the caller's bearer token.

/// Service configuration.
pub mod config;

/// GraphQL schema, resolvers, and the authorization check.
pub mod schema;

/// Client-side view of the auth service.
pub mod secret_source;

/// Counter storage.
pub mod state;

pub use config::ApiConfig;
pub use schema::{build_schema, ApiSchema, Hello};
pub use secret_source::{HttpSecretSource, SecretSource};
pub use state::Counter;
