//! Prometheus Metrics Registry - Upstream Call Observability
//!
//! Counts every upstream call by platform API, operation and outcome,
//! and records its latency. Rendered in the text exposition format by
//! the `/metrics` route of both services.

use std::time::Duration;

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::warn;

use crate::ports::UpstreamError;

/// How an upstream call ended, as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    Status,
    Transport,
    Decode,
    Signing,
}

impl CallOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CallOutcome::Success => "success",
            CallOutcome::Status => "status",
            CallOutcome::Transport => "transport",
            CallOutcome::Decode => "decode",
            CallOutcome::Signing => "signing",
        }
    }

    pub fn of<T>(result: &Result<T, UpstreamError>) -> Self {
        match result {
            Ok(_) => CallOutcome::Success,
            Err(UpstreamError::Status { .. }) => CallOutcome::Status,
            Err(UpstreamError::Transport { .. }) => CallOutcome::Transport,
            Err(UpstreamError::Decode { .. }) => CallOutcome::Decode,
            Err(UpstreamError::Signing(_)) => CallOutcome::Signing,
        }
    }
}

/// Upstream call metrics, registered in a private registry.
///
/// All metrics follow the naming convention `gateway_upstream_*`.
pub struct UpstreamMetrics {
    registry: Registry,
    /// Calls by api, operation and outcome.
    pub requests: IntCounterVec,
    /// Call latency in seconds by api and operation.
    pub latency: HistogramVec,
}

impl UpstreamMetrics {
    /// Create and register all metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(
                "gateway_upstream_requests_total",
                "Upstream API calls by outcome",
            ),
            &["api", "operation", "outcome"],
        )?;

        let latency = HistogramVec::new(
            HistogramOpts::new(
                "gateway_upstream_request_duration_seconds",
                "Upstream API call latency in seconds",
            )
            .buckets(vec![0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["api", "operation"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    /// Record one finished upstream call.
    pub fn observe(&self, api: &str, operation: &str, outcome: CallOutcome, elapsed: Duration) {
        self.requests
            .with_label_values(&[api, operation, outcome.as_str()])
            .inc();
        self.latency
            .with_label_values(&[api, operation])
            .observe(elapsed.as_secs_f64());
    }

    /// Text exposition of everything registered.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_observe_and_render() {
        let metrics = UpstreamMetrics::new().unwrap();
        metrics.observe("Gamma", "list_markets", CallOutcome::Success, Duration::from_millis(40));
        metrics.observe("Gamma", "list_markets", CallOutcome::Status, Duration::from_millis(12));

        let text = metrics.render();
        assert!(text.contains(
            r#"gateway_upstream_requests_total{api="Gamma",operation="list_markets",outcome="success"} 1"#
        ));
        assert!(text.contains("gateway_upstream_request_duration_seconds_count"));
    }

    #[test]
    fn test_outcome_of_result() {
        let ok: Result<(), UpstreamError> = Ok(());
        assert_eq!(CallOutcome::of(&ok), CallOutcome::Success);

        let err: Result<(), UpstreamError> = Err(UpstreamError::Status {
            api: "Kalshi",
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        });
        assert_eq!(CallOutcome::of(&err), CallOutcome::Status);
    }
}
