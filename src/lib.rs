//! Token-gated mock GraphQL service pair.
//!
//! Two independent services composed through one outbound HTTP call:
//!
//! - the **auth service** owns a single rotating secret token and exposes
//!   it over GraphQL for reading (`token`) and rotation (`newToken`);
//! - the **API service** serves a `hello { message num }` query and a
//!   `newNumber` mutation backed by an in-memory counter, authorizing every
//!   request by fetching the current secret from the auth service and
//!   comparing it to the caller's `authorization` header.
//!
//! A token mismatch yields an `UNAUTHORIZED` GraphQL error carrying a
//! `missing_token` flag; an unreachable auth service yields a distinct
//! `AUTH_UNAVAILABLE` error. Both ride in the `errors` array of an
//! HTTP 200 response, per the GraphQL-over-HTTP convention.

/// Token-gated API service.
pub mod api;

/// Token-issuing (auth) service.
pub mod auth;

/// Error types.
pub mod error;

/// Shared HTTP serving glue.
pub mod server;

pub use error::{Error, Result};
