//! HTTP server setup and lifecycle.
//!
//! Opens the database (schema initialization is fatal on failure), then
//! serves the API router until the shutdown signal fires.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::Config;
use crate::http::{create_router, AppState};
use crate::storage::Database;

/// Run the Picnic HTTP server.
///
/// Returns when the server has shut down.
pub async fn run_server(
    config: Config,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let db = Database::open(&config.database, config.storage_config()).map_err(|e| {
        tracing::error!(path = %config.database.display(), error = %e, "Failed to open database");
        e
    })?;

    let router = create_router(AppState::new(db));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Starting Picnic HTTP server");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("Shutdown signal received, stopping server");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
