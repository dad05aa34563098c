use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use users_api_rust::config::{self, AppConfig};
use users_api_rust::database::DatabaseManager;
use users_api_rust::{app, AppState};

#[derive(Parser, Debug)]
#[command(name = "users-api-rust", version, about = "Token-gated user records API")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config: AppConfig = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    tracing::info!("Starting Users API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    let state = AppState::new(pool, &config).context("invalid security configuration")?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Users API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, &config)).await.context("server")?;
    Ok(())
}
