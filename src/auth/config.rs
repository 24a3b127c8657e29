use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default bind port for the auth service.
pub const DEFAULT_PORT: u16 = 8002;

/// Auth service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Hostname or IP address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AuthConfig {
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
}
