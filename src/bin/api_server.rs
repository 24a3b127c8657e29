use std::sync::Arc;

use clap::Parser;
use token_gate::api::{build_schema, ApiConfig, Counter, HttpSecretSource};
use token_gate::server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "api-server")]
#[command(about = "Mock token-gated GraphQL API service", long_about = None)]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, env = "API_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "API_PORT", default_value = "8001")]
    port: u16,

    /// GraphQL endpoint of the auth service
    #[arg(
        long,
        env = "AUTH_ENDPOINT",
        default_value = "http://127.0.0.1:8002/graphql"
    )]
    auth_endpoint: String,

    /// Timeout for one secret lookup, in seconds
    #[arg(long, env = "AUTH_TIMEOUT_SECS", default_value = "5")]
    auth_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        auth_endpoint: args.auth_endpoint,
        auth_timeout_secs: args.auth_timeout_secs,
    };
    config.validate()?;

    let source = HttpSecretSource::new(config.auth_endpoint.clone(), config.auth_timeout())?;
    let schema = build_schema(Counter::new(), Arc::new(source));

    let handle = server::spawn(schema, config.addr()?).await?;
    info!("api service ready at {}", handle.url());
    info!("authorizing against {}", config.auth_endpoint);

    server::shutdown_signal().await;
    info!("shutting down");
    handle.stop().await;

    Ok(())
}
