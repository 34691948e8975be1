//! Kalshi Adapters - Signed Trade API v2 Client
//!
//! - `auth`: RSA-PSS request signing with the configured API key
//! - `client`: `KalshiApi` implementation

pub mod auth;
pub mod client;

pub use auth::KalshiAuth;
pub use client::KalshiClient;
