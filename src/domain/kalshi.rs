//! Kalshi Trade API Shapes
//!
//! Upstream bodies, the normalized results handed back to routes, and
//! the parameter objects accepted by the Kalshi port. Unknown upstream
//! fields are kept in `extra` and re-emitted untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::money::{cents_as_f64, cents_to_dollars, format_usd};
use super::null_as_default;

/// Default page size for `/api/markets`.
pub const DEFAULT_MARKETS_LIMIT: u32 = 50;
/// Default page size for `/api/orders`.
pub const DEFAULT_ORDERS_LIMIT: u32 = 100;
/// Default page size for `/api/markets/:ticker/trades`.
pub const DEFAULT_TRADES_LIMIT: u32 = 100;
/// Default page size for `/api/events`.
pub const DEFAULT_EVENTS_LIMIT: u32 = 50;
/// Default page size for `/api/series`.
pub const DEFAULT_SERIES_LIMIT: u32 = 50;

/// Zero means "not supplied" and falls back to the endpoint default.
pub fn limit_or_default(limit: u32, default: u32) -> u32 {
  if limit == 0 { default } else { limit }
}

// ── Upstream aggregates ─────────────────────────────────────

/// `GET /portfolio/balance` body. Amounts are in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiBalance {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub balance: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub portfolio_value: Option<i64>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// A Kalshi market. Prices are in cents, as sent by Kalshi.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiMarket {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub event_ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub close_time: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub yes_bid: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub yes_ask: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub no_bid: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub no_ask: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_price: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub volume: Option<i64>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Both sides of a Kalshi order book, normally `[price_cents, quantity]`
/// pairs. Levels are relayed untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiOrderbook {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub yes: Option<Vec<Value>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub no: Option<Vec<Value>>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// `GET /markets/{ticker}/orderbook` body, relayed whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiOrderbookResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub orderbook: Option<KalshiOrderbook>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// A public trade print.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiTrade {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trade_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub count: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub yes_price: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub no_price: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub taker_side: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// An order as reported by the portfolio API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiOrder {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub order_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub client_order_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub side: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action: Option<String>,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub order_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub yes_price: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub no_price: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_time: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiEvent {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub event_ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub series_ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sub_title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mutually_exclusive: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiSeries {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ticker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub frequency: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// `GET /exchange/status` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KalshiExchangeStatus {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exchange_active: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trading_active: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

// ── Normalized results ──────────────────────────────────────
//
// Single-item results double as the upstream body shape: Kalshi wraps
// each aggregate under the same key the relayed result uses.

/// Balance in dollars plus the raw cents payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
  pub balance: f64,
  pub formatted: String,
  pub raw: KalshiBalance,
}

impl BalanceSummary {
  /// A missing balance counts as zero.
  pub fn from_raw(raw: KalshiBalance) -> Self {
    let cents = raw.balance.unwrap_or_default();
    Self {
      balance: cents_as_f64(cents),
      formatted: format_usd(cents_to_dollars(cents)),
      raw,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketResult {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub market: Option<KalshiMarket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketPage {
  #[serde(default, deserialize_with = "null_as_default")]
  pub markets: Vec<KalshiMarket>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderbookResult {
  pub orderbook: KalshiOrderbookResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePage {
  #[serde(default, deserialize_with = "null_as_default")]
  pub trades: Vec<KalshiTrade>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub order: Option<KalshiOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
  #[serde(default, deserialize_with = "null_as_default")]
  pub orders: Vec<KalshiOrder>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
}

/// Only the event itself is relayed; nested markets are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResult {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub event: Option<KalshiEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
  #[serde(default, deserialize_with = "null_as_default")]
  pub events: Vec<KalshiEvent>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub series: Option<KalshiSeries>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPage {
  #[serde(default, deserialize_with = "null_as_default")]
  pub series: Vec<KalshiSeries>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
}

/// Exchange flags lifted to camelCase next to the raw body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeStatusSummary {
  #[serde(rename = "exchangeActive", skip_serializing_if = "Option::is_none")]
  pub exchange_active: Option<bool>,
  #[serde(rename = "tradingActive", skip_serializing_if = "Option::is_none")]
  pub trading_active: Option<bool>,
  pub raw: KalshiExchangeStatus,
}

impl ExchangeStatusSummary {
  pub fn from_raw(raw: KalshiExchangeStatus) -> Self {
    Self {
      exchange_active: raw.exchange_active,
      trading_active: raw.trading_active,
      raw,
    }
  }
}

// ── Parameters ──────────────────────────────────────────────

/// Query for `GET /markets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMarketsParams {
  pub limit: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_ticker: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub series_ticker: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
}

impl Default for ListMarketsParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_MARKETS_LIMIT,
      cursor: None,
      event_ticker: None,
      series_ticker: None,
      status: None,
    }
  }
}

/// Query for `GET /markets/trades`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTradesParams {
  pub ticker: String,
  pub limit: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
}

impl MarketTradesParams {
  pub fn new(ticker: impl Into<String>) -> Self {
    Self {
      ticker: ticker.into(),
      limit: DEFAULT_TRADES_LIMIT,
      cursor: None,
    }
  }
}

/// Query for `GET /portfolio/orders`. `market_ticker` goes upstream as `ticker`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListOrdersParams {
  pub limit: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
  #[serde(rename = "ticker", skip_serializing_if = "Option::is_none")]
  pub market_ticker: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub event_ticker: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub series_ticker: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
}

impl Default for ListOrdersParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_ORDERS_LIMIT,
      cursor: None,
      market_ticker: None,
      event_ticker: None,
      series_ticker: None,
      status: None,
    }
  }
}

/// Query for `GET /events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEventsParams {
  pub limit: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
}

impl Default for ListEventsParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_EVENTS_LIMIT,
      cursor: None,
      category: None,
      status: None,
    }
  }
}

/// Query for `GET /series`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSeriesParams {
  pub limit: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cursor: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

impl Default for ListSeriesParams {
  fn default() -> Self {
    Self {
      limit: DEFAULT_SERIES_LIMIT,
      cursor: None,
      category: None,
    }
  }
}

/// Order creation payload, relayed to Kalshi exactly as received.
///
/// Kalshi expects `ticker`, `side` (`yes`/`no`), `action` (`buy`/`sell`),
/// `count`, `type` (`limit`/`market`) and a price field, plus optional
/// `client_order_id` and `expiration_ts`. Nothing is checked here, not
/// even value types; Kalshi rejects bad orders and the rejection comes
/// back as an unsuccessful outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreateOrderRequest(pub Map<String, Value>);

impl CreateOrderRequest {
  /// Raw value of `key`, whatever its type.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn ticker(&self) -> Option<&str> {
    self.get("ticker").and_then(Value::as_str)
  }
}

/// Amend payload. Only `count` and `limit_price` reach Kalshi, with
/// whatever JSON values the caller sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AmendOrderRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub count: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit_price: Option<Value>,
}

impl AmendOrderRequest {
  /// Pick the amendable fields out of a request body. Absent keys stay
  /// absent; an explicit `null` is forwarded as `null`.
  pub fn from_body(body: &Map<String, Value>) -> Self {
    Self {
      count: body.get("count").cloned(),
      limit_price: body.get("limit_price").cloned(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_balance_summary_converts_cents() {
    let raw: KalshiBalance = serde_json::from_value(json!({"balance": 12345})).unwrap();
    let summary = BalanceSummary::from_raw(raw);
    assert_eq!(summary.balance, 123.45);
    assert_eq!(summary.formatted, "$123.45");
    assert_eq!(
      serde_json::to_value(&summary).unwrap(),
      json!({"balance": 123.45, "formatted": "$123.45", "raw": {"balance": 12345}})
    );
  }

  #[test]
  fn test_missing_balance_is_zero() {
    let summary = BalanceSummary::from_raw(KalshiBalance::default());
    assert_eq!(summary.balance, 0.0);
    assert_eq!(summary.formatted, "$0");
  }

  #[test]
  fn test_market_keeps_unknown_fields() {
    let body = json!({
      "ticker": "INXD-24DEC31-B5000",
      "yes_bid": 42,
      "rules_primary": "Resolves YES if...",
      "yes_bid_dollars": "0.4200"
    });
    let market: KalshiMarket = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(market.ticker.as_deref(), Some("INXD-24DEC31-B5000"));
    assert_eq!(market.yes_bid, Some(42));
    assert_eq!(serde_json::to_value(&market).unwrap(), body);
  }

  #[test]
  fn test_null_page_becomes_empty() {
    let page: OrderPage = serde_json::from_value(json!({"orders": null, "cursor": ""})).unwrap();
    assert!(page.orders.is_empty());
    assert_eq!(
      serde_json::to_value(&page).unwrap(),
      json!({"orders": [], "cursor": ""})
    );

    let page: MarketPage = serde_json::from_value(json!({})).unwrap();
    assert_eq!(serde_json::to_value(&page).unwrap(), json!({"markets": []}));
  }

  #[test]
  fn test_exchange_status_summary() {
    let raw: KalshiExchangeStatus =
      serde_json::from_value(json!({"exchange_active": true, "trading_active": false})).unwrap();
    let value = serde_json::to_value(ExchangeStatusSummary::from_raw(raw)).unwrap();
    assert_eq!(
      value,
      json!({
        "exchangeActive": true,
        "tradingActive": false,
        "raw": {"exchange_active": true, "trading_active": false}
      })
    );
  }

  #[test]
  fn test_list_orders_query_renames_market_ticker() {
    let params = ListOrdersParams {
      market_ticker: Some("KXBTC-25".to_string()),
      status: Some("resting".to_string()),
      ..Default::default()
    };
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(value, json!({"limit": 100, "ticker": "KXBTC-25", "status": "resting"}));
  }

  #[test]
  fn test_create_order_is_relayed_verbatim() {
    let body = json!({
      "ticker": "KXBTC-25",
      "side": "yes",
      "action": "buy",
      "count": "3",
      "type": "limit",
      "yes_price": 45.5,
      "expiration_ts": null
    });
    let order: CreateOrderRequest = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(order.ticker(), Some("KXBTC-25"));
    assert_eq!(order.get("count"), Some(&json!("3")));
    assert_eq!(serde_json::to_value(&order).unwrap(), body);
  }

  #[test]
  fn test_amend_picks_raw_fields() {
    let body = json!({"count": 2.5, "limit_price": null, "side": "no"});
    let amend = AmendOrderRequest::from_body(body.as_object().unwrap());
    assert_eq!(amend.count, Some(json!(2.5)));
    assert_eq!(
      serde_json::to_value(&amend).unwrap(),
      json!({"count": 2.5, "limit_price": null})
    );

    let empty = AmendOrderRequest::from_body(&Map::new());
    assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
  }

  #[test]
  fn test_orderbook_levels_tolerate_shape_drift() {
    let body = json!({"orderbook": {"yes": [[45, 100], [44, 12.5], ["0.43", 7]], "no": null}});
    let book: KalshiOrderbookResponse = serde_json::from_value(body).unwrap();
    let book = book.orderbook.unwrap();
    assert_eq!(book.yes.unwrap()[1], json!([44, 12.5]));
    assert_eq!(book.no, None);
  }

  #[test]
  fn test_limit_or_default() {
    assert_eq!(limit_or_default(0, DEFAULT_MARKETS_LIMIT), 50);
    assert_eq!(limit_or_default(7, DEFAULT_MARKETS_LIMIT), 7);
  }
}
