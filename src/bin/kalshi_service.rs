//! Kalshi Service — Entry Point
//!
//! Wiring sequence:
//! 1. Load `.env`, then config.toml + environment overrides
//! 2. Init tracing (JSON structured logging by default)
//! 3. Create the upstream HTTP client and metrics registry
//! 4. Load the signing key when `KALSHI_API_KEY_ID` is set
//! 5. Serve the Kalshi router on `PORT` (default 3000) until SIGINT

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use prediction_market_gateway::adapters::http::{self, KalshiState};
use prediction_market_gateway::adapters::kalshi::KalshiClient;
use prediction_market_gateway::adapters::metrics::UpstreamMetrics;
use prediction_market_gateway::adapters::upstream::UpstreamHttp;
use prediction_market_gateway::config::{self, ServiceKind};
use prediction_market_gateway::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let kind = ServiceKind::Kalshi;
    let config = config::loader::load_config(kind, |key| std::env::var(key).ok())
        .context("Failed to load configuration")?;

    telemetry::init_tracing(&config.logging)?;

    let metrics = Arc::new(UpstreamMetrics::new().context("Failed to register metrics")?);
    let upstream = UpstreamHttp::new(&config.upstream, Arc::clone(&metrics))?;

    let credentials = config.kalshi.credentials()?;
    let client = KalshiClient::new(upstream, &config.kalshi.base_url, credentials.as_ref())
        .context("Failed to create Kalshi client")?;

    let port = config.port(kind);
    info!(
        service = "kalshi-ts-service",
        version = env!("CARGO_PKG_VERSION"),
        port,
        base_url = %config.kalshi.base_url,
        authenticated = client.is_authenticated(),
        "Starting Kalshi service"
    );

    let state = KalshiState {
        api: Arc::new(client),
        metrics,
    };
    let app = http::kalshi_router(state, &config.server.cors_origins);

    http::serve(&config.server.host, port, app).await?;

    info!("Shutdown complete");
    Ok(())
}
