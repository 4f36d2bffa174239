//! # User Dispatch Server
//!
//! Parses [`Config`], starts the [`UserSystem`], and serves its router until
//! Ctrl-C, then shuts the store down.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use user_dispatch::lifecycle::tracing::setup_tracing;
use user_dispatch::lifecycle::{Config, UserSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing();

    info!(bind = %config.bind, "Starting user dispatch server");
    let system = UserSystem::start(&config)
        .await
        .context("failed to start user system")?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, system.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    system.shutdown().await.context("shutdown failed")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
