//! HTML front end for the menu catalog.
//!
//! Talks to a running `menu-server` over the schema named by
//! `REPLY_CONVENTION`; the channel connects lazily so start order does not
//! matter.

use anyhow::{Context, Result};
use clap::Parser;
use menu_rpc::config::WebConfig;
use menu_rpc::shutdown::Shutdown;
use menu_rpc::telemetry::init_tracing;
use menu_rpc::web;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("menu_rpc=info,menu_web=info");

    let config = WebConfig::parse();
    let gateway = web::connect(&config.rpc_endpoint, config.convention.convention)
        .context("failed to configure the menu service client")?;
    info!(
        endpoint = %config.rpc_endpoint,
        convention = %config.convention.convention,
        "menu service client ready"
    );

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();

    web::serve(gateway, listener, shutdown, config.shutdown_grace())
        .await
        .context("web server error")
}
