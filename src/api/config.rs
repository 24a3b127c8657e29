use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default bind port for the API service.
pub const DEFAULT_PORT: u16 = 8001;

/// Default GraphQL endpoint of the auth service.
pub const DEFAULT_AUTH_ENDPOINT: &str = "http://127.0.0.1:8002/graphql";

/// Default upper bound, in seconds, on one secret lookup round-trip.
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 5;

/// API service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Hostname or IP address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    /// GraphQL endpoint of the auth service.
    pub auth_endpoint: String,
    /// Timeout for one secret lookup, in seconds.
    pub auth_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            auth_timeout_secs: DEFAULT_AUTH_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Converts host and port into a socket address.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if the host and port do not form a
    /// valid socket address.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                Error::InvalidConfig(format!(
                    "invalid bind address (host: {}, port: {}): {e}",
                    self.host, self.port
                ))
            })
    }

    /// Timeout applied to every secret lookup.
    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }

    /// Validates the configuration before startup.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if any value is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.auth_endpoint.is_empty() {
            return Err(Error::InvalidConfig(
                "auth_endpoint cannot be empty".to_string(),
            ));
        }

        if self.auth_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "auth_timeout_secs cannot be zero".to_string(),
            ));
        }

        self.addr().map(|_| ())
    }
}
