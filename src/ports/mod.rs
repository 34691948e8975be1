//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Traits the route tables depend on. The reqwest-backed adapters in
//! `crate::adapters` implement them for production; tests plug in
//! mocks.
//!
//! Port categories:
//! - `KalshiApi`: Kalshi Trade API v2 operations
//! - `PolymarketApi`: Polymarket Gamma, CLOB and Data API operations
//! - `UpstreamError`: the failure every port operation reports

pub mod error;
pub mod kalshi;
pub mod polymarket;

pub use error::{UpstreamError, UpstreamResult};
pub use kalshi::KalshiApi;
pub use polymarket::PolymarketApi;
