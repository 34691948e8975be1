//! Polymarket Port - Gamma, CLOB and Data API Operations
//!
//! Market discovery goes to Gamma, books and prices to the CLOB, and
//! wallet history to the Data API. Endpoints whose payloads are relayed
//! untyped return `serde_json::Value`.

use async_trait::async_trait;
use serde_json::Value;

use super::error::UpstreamResult;
use crate::domain::polymarket::{
    EventList, EventResult, ListEventsParams, ListMarketsParams, MarketList, MarketResult,
    OrderbookResult, ProfileResult, SearchParams, TokenPrice, WalletTradesParams,
};

#[async_trait]
pub trait PolymarketApi: Send + Sync + 'static {
    async fn list_markets(&self, params: &ListMarketsParams) -> UpstreamResult<MarketList>;

    async fn get_market(&self, condition_id: &str) -> UpstreamResult<MarketResult>;

    async fn list_events(&self, params: &ListEventsParams) -> UpstreamResult<EventList>;

    async fn get_event(&self, slug: &str) -> UpstreamResult<EventResult>;

    async fn get_profile(&self, wallet_address: &str) -> UpstreamResult<ProfileResult>;

    /// Free-text search across markets, events and profiles.
    async fn search(&self, params: &SearchParams) -> UpstreamResult<Value>;

    async fn get_orderbook(&self, token_id: &str) -> UpstreamResult<OrderbookResult>;

    async fn get_trades(&self, token_id: &str, limit: u32) -> UpstreamResult<Value>;

    async fn get_price(&self, token_id: &str) -> UpstreamResult<TokenPrice>;

    async fn get_positions(&self, wallet_address: &str) -> UpstreamResult<Value>;

    async fn get_wallet_trades(
        &self,
        wallet_address: &str,
        params: &WalletTradesParams,
    ) -> UpstreamResult<Value>;
}
