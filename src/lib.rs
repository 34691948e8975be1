//! Prediction Market Gateway — Library Root
//!
//! Shared code behind the `kalshi-service` and `polymarket-service`
//! binaries. Re-exported for integration tests.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
