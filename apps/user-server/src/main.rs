//! REST API server for the in-memory user registry.
//!
//! Wires configuration, logging, the user store and the HTTP server,
//! and shuts down on Ctrl+C.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use user_store_api::{router::Router, server::Server};
use user_store_core::config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use user_store_core::UserStore;

/// Command-line arguments for the user server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables win over it
    dotenvy::dotenv().ok();

    let config = ServerConfig::from(Args::parse());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config
        .socket_addr()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;

    let store = Arc::new(UserStore::new());
    let router = Router::new(Arc::clone(&store));
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Starting user server...");
    tracing::info!("  Host: {}", config.host);
    tracing::info!("  Port: {}", server.local_addr()?.port());
    tracing::info!("  Users: {}", store.len()?);

    server
        .serve(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl_c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down server...");
        })
        .await?;

    Ok(())
}
