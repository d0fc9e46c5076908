//! Public Events Server
//!
//! A minimal REST service exposing CRUD over the `PUBLIC_EVENT` table.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, get_database_url};
use server::{build_router, run_server};
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Public events REST API server
#[derive(Parser, Debug)]
#[command(name = "pubev-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./pubev-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting pubev-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen);
    let config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = config.server.listen;

    // Get database URL from environment
    let database_url = get_database_url().map_err(|e| {
        tracing::error!("DATABASE_URL environment variable not set");
        e
    })?;

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;
    tracing::info!("Database connection established");

    // Create application state
    let state = AppState::new(db_pool.clone());

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Close database connections gracefully
    tracing::info!("Closing database connections...");
    db_pool.close().await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
