//! Polymarket Adapters - Public Gamma, CLOB and Data API Client

pub mod client;

pub use client::PolymarketClient;
