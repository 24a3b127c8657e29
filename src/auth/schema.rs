use async_graphql::{Context, EmptySubscription, Object, Schema};
use tracing::info;

use super::state::SecretStore;

/// Schema served by the auth service.
pub type AuthSchema = Schema<AuthQuery, AuthMutation, EmptySubscription>;

/// Root query object.
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// Current secret token.
    async fn token(&self, ctx: &Context<'_>) -> String {
        ctx.data_unchecked::<SecretStore>().current().await
    }
}

/// Root mutation object.
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Rotates the secret and returns the new value. The previous token
    /// stops authorizing immediately.
    async fn new_token(&self, ctx: &Context<'_>) -> String {
        let next = ctx.data_unchecked::<SecretStore>().rotate().await;
        info!("secret rotated");
        next
    }
}

/// Builds the auth schema around the given store.
pub fn build_schema(store: SecretStore) -> AuthSchema {
    Schema::build(AuthQuery, AuthMutation, EmptySubscription)
        .data(store)
        .finish()
}
