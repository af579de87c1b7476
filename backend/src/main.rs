//! Main entry point for the auth service.
//!
//! This file installs logging, opens the account database, and serves the
//! signup (`POST /user`) and login (`POST /auth`) endpoints until Ctrl-C,
//! then closes the pool and flushes the log sink.

use anyhow::{Context, Result};
use auth_service::api;
use auth_service::auth::state::AuthState;
use auth_service::config::Config;
use auth_service::database::Database;
use auth_service::utils::logging;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let log_guard = logging::init(config.log_file.as_deref())?;

    let db = Database::new(&config).await?;
    let state = Arc::new(AuthState::from_config(&config));
    let app = api::router(db.pool().clone(), state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting auth service on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    db.close().await;
    info!("Auth service stopped");
    log_guard.flush().context("failed to flush log sink")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
