//! Polymarket Gamma / CLOB / Data API Shapes
//!
//! Polymarket quotes prices and sizes in major units, so nothing here
//! is rescaled. Search, trade history and wallet data stay untyped
//! `serde_json::Value` pass-through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Default page size for `/api/markets` and `/api/events`.
pub const DEFAULT_LIST_LIMIT: u32 = 50;
/// Default page size for `/api/search`.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// Default page size for `/api/trades/:tokenId` and `/api/wallet-trades/:walletAddress`.
pub const DEFAULT_TRADES_LIMIT: u32 = 100;
/// Default `order` for `/api/markets`.
pub const DEFAULT_MARKET_ORDER: &str = "volume";
/// Default `order_dir` for `/api/markets`.
pub const DEFAULT_ORDER_DIR: &str = "desc";

/// A price or size that the CLOB may send as a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
  Text(String),
  Number(Number),
}

impl Quantity {
  /// Numeric view, if the value parses.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Quantity::Text(s) => s.trim().parse().ok(),
      Quantity::Number(n) => n.as_f64(),
    }
  }
}

// ── Gamma API ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GammaMarket {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(rename = "conditionId", default, skip_serializing_if = "Option::is_none")]
  pub condition_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub question: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slug: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub closed: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GammaEvent {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slug: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "startDate", default, skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
  #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub closed: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Public trading profile of a wallet. Statistics may arrive as
/// numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wallet_address: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profit_loss: Option<Quantity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub volume: Option<Quantity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trades: Option<Quantity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub markets_traded: Option<Quantity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub biggest_win: Option<Quantity>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

// ── CLOB API ────────────────────────────────────────────────

/// One price level of the CLOB book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub price: Option<Quantity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size: Option<Quantity>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClobOrderBook {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub market: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub asset_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bids: Option<Vec<BookLevel>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub asks: Option<Vec<BookLevel>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hash: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// `GET /price` body; only `price` is relayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub price: Option<Quantity>,
}

// ── Normalized results ──────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketList {
  pub markets: Vec<GammaMarket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketResult {
  pub market: GammaMarket,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventList {
  pub events: Vec<GammaEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventResult {
  pub event: GammaEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileResult {
  pub profile: Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderbookResult {
  pub orderbook: ClobOrderBook,
}

// ── Parameters ──────────────────────────────────────────────

/// Filters for the Gamma `/markets` listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListMarketsParams {
  pub limit: u32,
  pub offset: u32,
  pub archived: bool,
  pub closed: bool,
  pub active: bool,
  /// `volume`, `liquidity` or `createdAt`.
  pub order: String,
  /// `asc` or `desc`.
  pub order_dir: String,
}

impl Default for ListMarketsParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_LIST_LIMIT,
      offset: 0,
      archived: false,
      closed: false,
      active: false,
      order: DEFAULT_MARKET_ORDER.to_string(),
      order_dir: DEFAULT_ORDER_DIR.to_string(),
    }
  }
}

/// Filters for the Gamma `/events` listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEventsParams {
  pub limit: u32,
  pub offset: u32,
  pub archived: bool,
  pub closed: bool,
  pub tag_id: Option<String>,
}

impl Default for ListEventsParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_LIST_LIMIT,
      offset: 0,
      archived: false,
      closed: false,
      tag_id: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
  pub query: String,
  pub limit: u32,
  pub offset: u32,
}

impl SearchParams {
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query: query.into(),
      limit: DEFAULT_SEARCH_LIMIT,
      offset: 0,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletTradesParams {
  pub limit: u32,
  pub offset: u32,
}

impl Default for WalletTradesParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_TRADES_LIMIT,
      offset: 0,
    }
  }
}
