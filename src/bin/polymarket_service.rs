//! Polymarket Service — Entry Point
//!
//! Same wiring as the Kalshi service, without credentials: the Gamma,
//! CLOB and Data APIs used here are public. Serves on `PORT` (default
//! 3001) until SIGINT.

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use prediction_market_gateway::adapters::http::{self, PolymarketState};
use prediction_market_gateway::adapters::metrics::UpstreamMetrics;
use prediction_market_gateway::adapters::polymarket::PolymarketClient;
use prediction_market_gateway::adapters::upstream::UpstreamHttp;
use prediction_market_gateway::config::{self, ServiceKind};
use prediction_market_gateway::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let kind = ServiceKind::Polymarket;
    let config = config::loader::load_config(kind, |key| std::env::var(key).ok())
        .context("Failed to load configuration")?;

    telemetry::init_tracing(&config.logging)?;

    let metrics = Arc::new(UpstreamMetrics::new().context("Failed to register metrics")?);
    let upstream = UpstreamHttp::new(&config.upstream, Arc::clone(&metrics))?;
    let client = PolymarketClient::new(upstream, &config.polymarket)
        .context("Failed to create Polymarket client")?;

    let port = config.port(kind);
    info!(
        service = "polymarket-service",
        version = env!("CARGO_PKG_VERSION"),
        port,
        gamma = %config.polymarket.gamma_url,
        clob = %config.polymarket.clob_url,
        data = %config.polymarket.data_url,
        "Starting Polymarket service"
    );

    let state = PolymarketState {
        api: Arc::new(client),
        metrics,
    };
    let app = http::polymarket_router(state, &config.server.cors_origins);

    http::serve(&config.server.host, port, app).await?;

    info!("Shutdown complete");
    Ok(())
}
