//! Metrics Adapters - Prometheus Observability
//!
//! - `prometheus`: upstream call counters and latency histograms,
//!   rendered for the `/metrics` route

pub mod prometheus;

pub use self::prometheus::{CallOutcome, UpstreamMetrics};
