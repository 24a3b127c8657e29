use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Where the API service learns the current secret from.
///
/// Injected into the schema so resolvers never talk to the network
/// directly and tests can substitute a double.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetches the secret the auth service currently holds.
    ///
    /// # Errors
    /// Returns [`Error::AuthUnavailable`] when the auth service cannot be
    /// reached in time or its reply cannot be decoded.
    async fn current_secret(&self) -> Result<String>;
}

/// GraphQL-over-HTTP client for the auth service.
///
/// Issues `{token}` against the configured endpoint. Every call is bounded
/// by the request timeout; there is no retry.
pub struct HttpSecretSource {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenReply {
    data: Option<TokenData>,
}

#[derive(Deserialize)]
struct TokenData {
    token: String,
}

impl HttpSecretSource {
    /// Creates a client for the given auth endpoint.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl SecretSource for HttpSecretSource {
    async fn current_secret(&self) -> Result<String> {
        let reply: TokenReply = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": "{token}" }))
            .send()
            .await
            .map_err(|e| Error::AuthUnavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::AuthUnavailable(e.to_string()))?;

        debug!(endpoint = %self.endpoint, "fetched current secret");

        reply
            .data
            .map(|d| d.token)
            .ok_or_else(|| Error::AuthUnavailable("reply carried no data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_an_upstream_error() {
        // Port 1 is never bound in the test environment; the connection is
        // refused immediately.
        let source =
            HttpSecretSource::new("http://127.0.0.1:1/graphql", Duration::from_millis(500))
                .unwrap();

        let err = source.current_secret().await.unwrap_err();
        assert!(matches!(err, Error::AuthUnavailable(_)));
    }
}
