//! HTTP Adapters - axum Routers for Both Services
//!
//! - `kalshi_routes` / `polymarket_routes`: route tables and handlers
//! - `response`: read envelopes (500 on failure) and order outcomes (always 200)
//! - `query`: query-string defaults
//! - `descriptor`: `GET /` service descriptors
//! - `cors`: allow-list CORS layer

pub mod cors;
pub mod descriptor;
pub mod kalshi_routes;
pub mod polymarket_routes;
pub mod query;
pub mod response;

use anyhow::Context;
use axum::Router;
use tracing::{info, warn};

pub use kalshi_routes::{kalshi_router, KalshiState};
pub use polymarket_routes::{polymarket_router, PolymarketState};

/// Bind `host:port` and serve `app` until Ctrl-C.
pub async fn serve(host: &str, port: u16, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;

    info!(address = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
