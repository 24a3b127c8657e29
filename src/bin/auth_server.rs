use clap::Parser;
use token_gate::auth::{build_schema, AuthConfig, SecretStore};
use token_gate::server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "auth-server")]
#[command(about = "Mock token-issuing GraphQL service", long_about = None)]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, env = "AUTH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "AUTH_PORT", default_value = "8002")]
    port: u16,
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

    let config = AuthConfig {
        host: args.host,
        port: args.port,
    };

    let store = SecretStore::new();
    info!("initial secret generated");

    let handle = server::spawn(build_schema(store), config.addr()?).await?;
    info!("auth service ready at {}", handle.url());

    server::shutdown_signal().await;
    info!("shutting down");
    handle.stop().await;

    Ok(())
}
