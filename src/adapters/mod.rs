//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` against the
//! platform HTTP APIs, and exposes them over axum.
//!
//! Adapter categories:
//! - `upstream`: shared reqwest executor with error mapping and metrics
//! - `kalshi`: RSA-PSS signed Kalshi Trade API v2 client
//! - `polymarket`: Gamma, CLOB and Data API client
//! - `http`: routers, handlers, CORS and service descriptors
//! - `metrics`: Prometheus upstream call metrics

pub mod http;
pub mod kalshi;
pub mod metrics;
pub mod polymarket;
pub mod upstream;
