//! Kalshi Port - Trade API v2 Operations
//!
//! One method per upstream operation. Each call issues exactly one
//! upstream request; nothing is retried or cached.

use async_trait::async_trait;

use super::error::UpstreamResult;
use crate::domain::kalshi::{
    AmendOrderRequest, BalanceSummary, CreateOrderRequest, EventPage, EventResult,
    ExchangeStatusSummary, ListEventsParams, ListMarketsParams, ListOrdersParams,
    ListSeriesParams, MarketPage, MarketResult, MarketTradesParams, OrderPage, OrderResult,
    OrderbookResult, SeriesPage, SeriesResult, TradePage,
};

/// Operations exposed by the Kalshi service.
///
/// A `limit` of zero in any params object means "use the endpoint
/// default".
#[async_trait]
pub trait KalshiApi: Send + Sync + 'static {
    /// Portfolio balance, converted from cents to dollars.
    async fn get_balance(&self) -> UpstreamResult<BalanceSummary>;

    async fn get_market(&self, ticker: &str) -> UpstreamResult<MarketResult>;

    async fn list_markets(&self, params: &ListMarketsParams) -> UpstreamResult<MarketPage>;

    /// Order book for a market; `depth` limits the levels per side.
    async fn get_market_orderbook(
        &self,
        ticker: &str,
        depth: Option<u32>,
    ) -> UpstreamResult<OrderbookResult>;

    async fn get_market_trades(&self, params: &MarketTradesParams) -> UpstreamResult<TradePage>;

    async fn create_order(&self, order: &CreateOrderRequest) -> UpstreamResult<OrderResult>;

    async fn cancel_order(&self, order_id: &str) -> UpstreamResult<OrderResult>;

    async fn list_orders(&self, params: &ListOrdersParams) -> UpstreamResult<OrderPage>;

    async fn get_order(&self, order_id: &str) -> UpstreamResult<OrderResult>;

    async fn amend_order(
        &self,
        order_id: &str,
        amend: &AmendOrderRequest,
    ) -> UpstreamResult<OrderResult>;

    async fn get_event(&self, event_ticker: &str) -> UpstreamResult<EventResult>;

    async fn list_events(&self, params: &ListEventsParams) -> UpstreamResult<EventPage>;

    async fn get_series(&self, series_ticker: &str) -> UpstreamResult<SeriesResult>;

    async fn list_series(&self, params: &ListSeriesParams) -> UpstreamResult<SeriesPage>;

    async fn get_exchange_status(&self) -> UpstreamResult<ExchangeStatusSummary>;
}
