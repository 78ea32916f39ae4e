//! HTTP server initialization and runtime setup.

use crate::application::RequestLogger;
use crate::config::Config;
use crate::infrastructure::sink::TracingSink;
use crate::routes::app_router;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the demo HTTP server with the given configuration.
///
/// Request records go to the process-wide `tracing` subscriber, which must be
/// installed by the caller.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address can't be parsed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let logger = RequestLogger::from_config(&config, Arc::new(TracingSink::new()));
    tracing::debug!(?logger, "Request logger configured");

    let app = app_router(logger);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
