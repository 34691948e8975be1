//! Kalshi Trade API v2 Client
//!
//! Implements `KalshiApi` over `UpstreamHttp`. When credentials are
//! configured every request is signed; otherwise requests go out
//! unsigned and portfolio calls fail upstream.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::auth::KalshiAuth;
use crate::adapters::upstream::{join_path, UpstreamHttp};
use crate::config::loader::validate_base_url;
use crate::config::{ConfigError, KalshiCredentials};
use crate::domain::kalshi::*;
use crate::ports::{KalshiApi, UpstreamResult};

const API: &str = "Kalshi";

pub struct KalshiClient {
  upstream: UpstreamHttp,
  base_url: Url,
  auth: Option<KalshiAuth>,
}

impl KalshiClient {
  /// Build the client, loading the private key when credentials are given.
  pub fn new(
    upstream: UpstreamHttp,
    base_url: &str,
    credentials: Option<&KalshiCredentials>,
  ) -> Result<Self, ConfigError> {
    let base_url = validate_base_url("KALSHI_BASE_URL", base_url)?;

    let auth = match credentials {
      Some(creds) => {
        let auth = KalshiAuth::from_pem_file(&creds.key_id, &creds.private_key_path)?;
        info!(key_id = %auth.key_id(), "Kalshi requests will be signed");
        Some(auth)
      }
      None => {
        warn!("KALSHI_API_KEY_ID not set, running unauthenticated (portfolio endpoints will fail)");
        None
      }
    };

    Ok(Self::with_auth(upstream, base_url, auth))
  }

  pub fn with_auth(upstream: UpstreamHttp, base_url: Url, auth: Option<KalshiAuth>) -> Self {
    Self {
      upstream,
      base_url,
      auth,
    }
  }

  pub fn is_authenticated(&self) -> bool {
    self.auth.is_some()
  }

  /// Sign (when configured) and execute one request.
  async fn call<T: DeserializeOwned>(
    &self,
    operation: &'static str,
    method: Method,
    segments: &[&str],
    build: impl FnOnce(RequestBuilder) -> RequestBuilder,
  ) -> UpstreamResult<T> {
    let url = join_path(&self.base_url, segments);
    let path = url.path().to_string();
    let mut request = build(self.upstream.client().request(method.clone(), url));

    if let Some(auth) = &self.auth {
      match auth.headers(method.as_str(), &path) {
        Ok(headers) => {
          for (name, value) in headers {
            request = request.header(name, value);
          }
        }
        Err(e) => return self.upstream.fail(API, operation, e),
      }
    }

    self.upstream.execute(API, operation, request).await
  }

  async fn get<T: DeserializeOwned>(
    &self,
    operation: &'static str,
    segments: &[&str],
  ) -> UpstreamResult<T> {
    self.call(operation, Method::GET, segments, |r| r).await
  }

  async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized + Sync>(
    &self,
    operation: &'static str,
    segments: &[&str],
    query: &Q,
  ) -> UpstreamResult<T> {
    self
      .call(operation, Method::GET, segments, |r| r.query(query))
      .await
  }
}

#[async_trait]
impl KalshiApi for KalshiClient {
  async fn get_balance(&self) -> UpstreamResult<BalanceSummary> {
    let raw: KalshiBalance = self.get("get_balance", &["portfolio", "balance"]).await?;
    Ok(BalanceSummary::from_raw(raw))
  }

  async fn get_market(&self, ticker: &str) -> UpstreamResult<MarketResult> {
    self.get("get_market", &["markets", ticker]).await
  }

  async fn list_markets(&self, params: &ListMarketsParams) -> UpstreamResult<MarketPage> {
    let query = ListMarketsParams {
      limit: limit_or_default(params.limit, DEFAULT_MARKETS_LIMIT),
      ..params.clone()
    };
    self.get_with_query("list_markets", &["markets"], &query).await
  }

  async fn get_market_orderbook(
    &self,
    ticker: &str,
    depth: Option<u32>,
  ) -> UpstreamResult<OrderbookResult> {
    let depth: Vec<(&str, u32)> = depth.into_iter().map(|d| ("depth", d)).collect();
    let orderbook: KalshiOrderbookResponse = self
      .get_with_query("get_market_orderbook", &["markets", ticker, "orderbook"], &depth)
      .await?;
    Ok(OrderbookResult { orderbook })
  }

  async fn get_market_trades(&self, params: &MarketTradesParams) -> UpstreamResult<TradePage> {
    let query = MarketTradesParams {
      limit: limit_or_default(params.limit, DEFAULT_TRADES_LIMIT),
      ..params.clone()
    };
    self.get_with_query("get_market_trades", &["markets", "trades"], &query).await
  }

  async fn create_order(&self, order: &CreateOrderRequest) -> UpstreamResult<OrderResult> {
    self
      .call("create_order", Method::POST, &["portfolio", "orders"], |r| {
        r.json(order)
      })
      .await
  }

  async fn cancel_order(&self, order_id: &str) -> UpstreamResult<OrderResult> {
    self
      .call("cancel_order", Method::DELETE, &["portfolio", "orders", order_id], |r| r)
      .await
  }

  async fn list_orders(&self, params: &ListOrdersParams) -> UpstreamResult<OrderPage> {
    let query = ListOrdersParams {
      limit: limit_or_default(params.limit, DEFAULT_ORDERS_LIMIT),
      ..params.clone()
    };
    self.get_with_query("list_orders", &["portfolio", "orders"], &query).await
  }

  async fn get_order(&self, order_id: &str) -> UpstreamResult<OrderResult> {
    self.get("get_order", &["portfolio", "orders", order_id]).await
  }

  async fn amend_order(
    &self,
    order_id: &str,
    amend: &AmendOrderRequest,
  ) -> UpstreamResult<OrderResult> {
    self
      .call(
        "amend_order",
        Method::POST,
        &["portfolio", "orders", order_id, "amend"],
        |r| r.json(amend),
      )
      .await
  }

  async fn get_event(&self, event_ticker: &str) -> UpstreamResult<EventResult> {
    self.get("get_event", &["events", event_ticker]).await
  }

  async fn list_events(&self, params: &ListEventsParams) -> UpstreamResult<EventPage> {
    let query = ListEventsParams {
      limit: limit_or_default(params.limit, DEFAULT_EVENTS_LIMIT),
      ..params.clone()
    };
    self.get_with_query("list_events", &["events"], &query).await
  }

  async fn get_series(&self, series_ticker: &str) -> UpstreamResult<SeriesResult> {
    self.get("get_series", &["series", series_ticker]).await
  }

  async fn list_series(&self, params: &ListSeriesParams) -> UpstreamResult<SeriesPage> {
    let query = ListSeriesParams {
      limit: limit_or_default(params.limit, DEFAULT_SERIES_LIMIT),
      ..params.clone()
    };
    self.get_with_query("list_series", &["series"], &query).await
  }

  async fn get_exchange_status(&self) -> UpstreamResult<ExchangeStatusSummary> {
    let raw: KalshiExchangeStatus = self
      .get("get_exchange_status", &["exchange", "status"])
      .await?;
    Ok(ExchangeStatusSummary::from_raw(raw))
  }
}
