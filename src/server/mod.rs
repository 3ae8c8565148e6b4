//! HTTP surface of the service.

pub mod exchange;

use crate::core::ConversionHandler;
use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub fn app_router(handler: ConversionHandler) -> Router {
    Router::new()
        .route("/exchange", get(exchange::exchange))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// Binds `listen_addr` and serves until Ctrl-C.
pub async fn serve(listen_addr: SocketAddr, handler: ConversionHandler) -> Result<()> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind to address {listen_addr}"))?;
    serve_with_shutdown(listener, handler, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    handler: ConversionHandler,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!("Listening on http://{local_addr}");

    axum::serve(listener, app_router(handler))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server stopped unexpectedly")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
