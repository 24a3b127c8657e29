//! Shared HTTP serving glue for both GraphQL services.
//!
//! Each service is an axum router with a POST `/graphql` route. The handler
//! lifts the inbound `authorization` header into the request's context data
//! so resolvers never touch transport types.

use std::net::SocketAddr;

use async_graphql::http::GraphiQLSource;
use async_graphql::{ObjectType, Schema, SubscriptionType};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::Result;

/// Bearer token lifted from the inbound `authorization` header, if any.
///
/// Attached to every GraphQL request as context data; the auth service
/// simply ignores it.
#[derive(Clone, Debug, Default)]
pub struct PresentedToken(pub Option<String>);

async fn graphql_handler<Q, M, S>(
    State(schema): State<Schema<Q, M, S>>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let request = req.into_inner().data(PresentedToken(token));
    schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

fn router<Q, M, S>(schema: Schema<Q, M, S>) -> Router
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    Router::new()
        .route("/graphql", post(graphql_handler::<Q, M, S>))
        .route("/", get(graphiql))
        .with_state(schema)
}

/// Handle to a running service: local address plus a shutdown trigger.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Address the service actually bound to (useful with port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// GraphQL endpoint URL of the running service.
    pub fn url(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// Stops the service and waits for in-flight requests to drain.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
    }
}

/// Binds the address and serves the schema in a background task.
///
/// # Errors
/// Returns [`crate::Error::Io`] if the listener cannot be bound.
pub async fn spawn<Q, M, S>(schema: Schema<Q, M, S>, addr: SocketAddr) -> Result<ServerHandle>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    let app = router(schema);
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            shutdown_receiver.await.ok();
        });

        if let Err(e) = serve.await {
            error!("server error: {e}");
        }
    });

    info!("listening on {local_addr}");

    Ok(ServerHandle {
        addr: local_addr,
        shutdown: Some(shutdown_sender),
        task,
    })
}

/// Resolves when ctrl-c or SIGTERM arrives.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{build_schema, SecretStore};

    #[tokio::test]
    async fn spawned_server_answers_on_its_reported_address() {
        let store = SecretStore::new();
        let expected = store.current().await;
        let handle = spawn(build_schema(store), "127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();

        let reply: serde_json::Value = reqwest::Client::new()
            .post(handle.url())
            .json(&serde_json::json!({ "query": "{token}" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(reply["data"]["token"], expected.as_str());
        handle.stop().await;
    }
}
