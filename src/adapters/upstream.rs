//! Upstream HTTP Executor - Shared reqwest Client
//!
//! Sends one request per call, maps the outcome onto `UpstreamError`
//! and records call metrics. No retries: each port operation issues
//! exactly one upstream request.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::adapters::metrics::{CallOutcome, UpstreamMetrics};
use crate::config::UpstreamConfig;
use crate::ports::{UpstreamError, UpstreamResult};

/// Pooled HTTP client shared by the platform adapters.
#[derive(Clone)]
pub struct UpstreamHttp {
  http: Client,
  metrics: Arc<UpstreamMetrics>,
}

impl UpstreamHttp {
  pub fn new(config: &UpstreamConfig, metrics: Arc<UpstreamMetrics>) -> Result<Self> {
    let mut builder = Client::builder()
      .pool_max_idle_per_host(5)
      .user_agent(concat!("prediction-market-gateway/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.timeout() {
      builder = builder.timeout(timeout);
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    Ok(Self { http, metrics })
  }

  /// Underlying client, for building requests.
  pub fn client(&self) -> &Client {
    &self.http
  }

  /// Send `request` and decode a 2xx JSON body into `T`.
  ///
  /// `api` names the platform API in error messages; `operation` is the
  /// metrics label.
  pub async fn execute<T: DeserializeOwned>(
    &self,
    api: &'static str,
    operation: &'static str,
    request: RequestBuilder,
  ) -> UpstreamResult<T> {
    let started = Instant::now();
    let result = Self::send(api, request).await;
    self.record(api, operation, &result, started);
    result
  }

  /// Record a call that failed before anything was sent.
  pub fn fail<T>(
    &self,
    api: &'static str,
    operation: &'static str,
    error: UpstreamError,
  ) -> UpstreamResult<T> {
    let result = Err(error);
    self.record(api, operation, &result, Instant::now());
    result
  }

  async fn send<T: DeserializeOwned>(api: &'static str, request: RequestBuilder) -> UpstreamResult<T> {
    let transport = |e: reqwest::Error| UpstreamError::Transport {
      api,
      message: e.to_string(),
    };

    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !status.is_success() {
      return Err(UpstreamError::Status { api, status, body });
    }

    serde_json::from_str(&body).map_err(|e| UpstreamError::Decode {
      api,
      message: e.to_string(),
    })
  }

  fn record<T>(
    &self,
    api: &'static str,
    operation: &'static str,
    result: &UpstreamResult<T>,
    started: Instant,
  ) {
    let elapsed = started.elapsed();
    self
      .metrics
      .observe(api, operation, CallOutcome::of(result), elapsed);

    match result {
      Ok(_) => debug!(api, operation, elapsed_ms = elapsed.as_millis() as u64, "Upstream call ok"),
      Err(e) => warn!(
        api,
        operation,
        kind = e.kind(),
        status = ?e.status(),
        error = %e,
        "Upstream call failed"
      ),
    }
  }
}

/// Append percent-encoded path segments to a base URL.
///
/// Identifiers are encoded as single segments, so a `/` inside one
/// never changes the upstream route.
pub fn join_path(base: &Url, segments: &[&str]) -> Url {
  let mut url = base.clone();
  if let Ok(mut path) = url.path_segments_mut() {
    path.pop_if_empty().extend(segments);
  }
  url
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_join_path_keeps_base_prefix() {
    let base = Url::parse("https://api.elections.kalshi.com/trade-api/v2").unwrap();
    let url = join_path(&base, &["markets", "INXD-24DEC31"]);
    assert_eq!(url.path(), "/trade-api/v2/markets/INXD-24DEC31");
  }

  #[test]
  fn test_join_path_trailing_slash_base() {
    let base = Url::parse("https://gamma-api.polymarket.com/").unwrap();
    let url = join_path(&base, &["events", "us-election"]);
    assert_eq!(url.as_str(), "https://gamma-api.polymarket.com/events/us-election");
  }

  #[test]
  fn test_join_path_encodes_identifiers() {
    let base = Url::parse("https://gamma-api.polymarket.com").unwrap();
    let url = join_path(&base, &["markets", "a/b c"]);
    assert_eq!(url.path(), "/markets/a%2Fb%20c");
  }
}
