//! Error types for the token-gate services.

use async_graphql::ErrorExtensions;

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The presented token does not match the current secret.
    #[error("unauthorized")]
    Unauthorized {
        /// True when the caller presented no token at all.
        missing_token: bool,
    },

    /// The auth service could not be reached or returned an unusable reply.
    #[error("auth service unavailable: {0}")]
    AuthUnavailable(String),

    /// Invalid service configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Listener or socket failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Machine-readable code surfaced in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Unauthorized { .. } => "UNAUTHORIZED",
            Error::AuthUnavailable(_) => "AUTH_UNAVAILABLE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO",
        }
    }
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Error::Unauthorized { missing_token } = self {
                e.set("missing_token", *missing_token);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_extends_with_marker_flag() {
        let err = Error::Unauthorized {
            missing_token: true,
        }
        .extend();

        assert_eq!(err.message, "unauthorized");
        let extensions = err.extensions.expect("extensions should be set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("UNAUTHORIZED"))
        );
        assert_eq!(
            extensions.get("missing_token"),
            Some(&async_graphql::Value::from(true))
        );
    }

    #[test]
    fn upstream_failure_keeps_its_own_code() {
        let err = Error::AuthUnavailable("connection refused".to_string()).extend();

        let extensions = err.extensions.expect("extensions should be set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("AUTH_UNAVAILABLE"))
        );
        assert_eq!(extensions.get("missing_token"), None);
    }
}
