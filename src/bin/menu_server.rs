//! Menu catalog gRPC server.
//!
//! Connects to the record store, then serves the schema matching the
//! configured reply convention until SIGINT/SIGTERM.
//!
//! ```bash
//! MENU_STORE_URI=file://menu_db.json REPLY_CONVENTION=envelope cargo run --bin menu-server
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use menu_rpc::config::{self, ServerConfig};
use menu_rpc::shutdown::{ServeError, Shutdown};
use menu_rpc::telemetry::init_tracing;
use menu_rpc::{grpc, store, CatalogService};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    config::apply_env_aliases();
    init_tracing("menu_rpc=info,menu_server=info");

    match run(ServerConfig::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "menu server exited with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<()> {
    let store = store::connect(&config.store_uri)
        .await
        .with_context(|| format!("failed to connect to record store {}", config.store_uri))?;
    info!(store = %config.store_uri, "record store connected");

    let catalog = Arc::new(CatalogService::new(store, config.reply_policy()));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();

    match grpc::serve(catalog, listener, shutdown, config.shutdown_grace()).await {
        Ok(()) => Ok(()),
        Err(err @ ServeError::GraceElapsed(_)) => Err(err).context("forced shutdown"),
        Err(err) => Err(err).context("gRPC server error"),
    }
}
