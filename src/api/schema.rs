use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema, SimpleObject};
use tracing::warn;

use super::secret_source::SecretSource;
use super::state::Counter;
use crate::server::PresentedToken;
use crate::{Error, Result};

/// Schema served by the API service.
pub type ApiSchema = Schema<ApiQuery, ApiMutation, EmptySubscription>;

const GREETING: &str = "Hello World";

/// Payload of the `hello` query.
#[derive(SimpleObject)]
pub struct Hello {
    /// Fixed greeting.
    pub message: String,
    /// Current counter value.
    pub num: i32,
}

/// Compares the caller's bearer token against the secret the auth service
/// currently holds.
///
/// An upstream failure surfaces as [`Error::AuthUnavailable`], never as a
/// token mismatch.
async fn authorize(ctx: &Context<'_>) -> Result<()> {
    let presented = ctx
        .data_opt::<PresentedToken>()
        .and_then(|t| t.0.as_deref())
        .unwrap_or("");

    let secret = ctx
        .data_unchecked::<Arc<dyn SecretSource>>()
        .current_secret()
        .await?;

    if presented == secret {
        return Ok(());
    }

    let missing_token = presented.is_empty();
    warn!(missing_token, "request denied");
    Err(Error::Unauthorized { missing_token })
}

/// Root query object.
pub struct ApiQuery;

#[Object]
impl ApiQuery {
    /// Greeting plus the current counter value. Requires a valid token.
    async fn hello(&self, ctx: &Context<'_>) -> async_graphql::Result<Hello> {
        authorize(ctx).await.map_err(|e| e.extend())?;

        let num = ctx.data_unchecked::<Counter>().current().await;
        Ok(Hello {
            message: GREETING.to_string(),
            num,
        })
    }
}

/// Root mutation object.
pub struct ApiMutation;

#[Object]
impl ApiMutation {
    /// Rotates the counter to a fresh random value in `[0, 100]` and
    /// returns it. Requires a valid token; on failure the counter is left
    /// untouched.
    async fn new_number(&self, ctx: &Context<'_>) -> async_graphql::Result<i32> {
        authorize(ctx).await.map_err(|e| e.extend())?;

        Ok(ctx.data_unchecked::<Counter>().rotate().await)
    }
}

/// Builds the API schema around the given counter and secret source.
pub fn build_schema(counter: Counter, source: Arc<dyn SecretSource>) -> ApiSchema {
    Schema::build(ApiQuery, ApiMutation, EmptySubscription)
        .data(counter)
        .data(source)
        .finish()
}

#[cfg(test)]
mod tests {
    use async_graphql::Request;
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::api::state::{INITIAL_VALUE, MAX_VALUE};

    const SECRET: &str = "c0ffee";

    struct FixedSecret;

    #[async_trait]
    impl SecretSource for FixedSecret {
        async fn current_secret(&self) -> Result<String> {
            Ok(SECRET.to_string())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl SecretSource for Unreachable {
        async fn current_secret(&self) -> Result<String> {
            Err(Error::AuthUnavailable("connection refused".to_string()))
        }
    }

    fn schema_with(source: impl SecretSource + 'static) -> (ApiSchema, Counter) {
        let counter = Counter::new();
        let schema = build_schema(counter.clone(), Arc::new(source));
        (schema, counter)
    }

    async fn execute(schema: &ApiSchema, query: &str, token: Option<&str>) -> Value {
        let request =
            Request::new(query).data(PresentedToken(token.map(str::to_owned)));
        serde_json::to_value(schema.execute(request).await).unwrap()
    }

    #[tokio::test]
    async fn hello_with_valid_token_returns_counter() {
        let (schema, _) = schema_with(FixedSecret);

        let response = execute(&schema, "{ hello { message num } }", Some(SECRET)).await;

        assert_eq!(response["data"]["hello"]["message"], "Hello World");
        assert_eq!(response["data"]["hello"]["num"], INITIAL_VALUE);
        assert!(response.get("errors").is_none());
    }

    #[tokio::test]
    async fn hello_with_wrong_token_is_unauthorized() {
        let (schema, _) = schema_with(FixedSecret);

        let response = execute(&schema, "{ hello { num } }", Some("wrong")).await;

        assert_eq!(response["data"], Value::Null);
        let err = &response["errors"][0];
        assert_eq!(err["message"], "unauthorized");
        assert_eq!(err["extensions"]["code"], "UNAUTHORIZED");
        assert_eq!(err["extensions"]["missing_token"], false);
    }

    #[tokio::test]
    async fn missing_token_sets_the_marker_flag() {
        let (schema, _) = schema_with(FixedSecret);

        let response = execute(&schema, "{ hello { num } }", None).await;

        assert_eq!(
            response["errors"][0]["extensions"]["missing_token"],
            true
        );
    }

    #[tokio::test]
    async fn new_number_with_valid_token_rotates_in_range() {
        let (schema, counter) = schema_with(FixedSecret);

        let response = execute(&schema, "mutation { newNumber }", Some(SECRET)).await;

        let rotated = response["data"]["newNumber"].as_i64().unwrap();
        assert!((0..=i64::from(MAX_VALUE)).contains(&rotated));
        assert_eq!(i64::from(counter.current().await), rotated);
    }

    #[tokio::test]
    async fn new_number_with_wrong_token_leaves_counter_alone() {
        let (schema, counter) = schema_with(FixedSecret);

        let response = execute(&schema, "mutation { newNumber }", Some("wrong")).await;

        assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHORIZED");
        assert_eq!(counter.current().await, INITIAL_VALUE);
    }

    #[tokio::test]
    async fn upstream_failure_is_not_reported_as_unauthorized() {
        let (schema, counter) = schema_with(Unreachable);

        let response = execute(&schema, "mutation { newNumber }", Some(SECRET)).await;

        assert_eq!(
            response["errors"][0]["extensions"]["code"],
            "AUTH_UNAVAILABLE"
        );
        assert_eq!(counter.current().await, INITIAL_VALUE);
    }
}
