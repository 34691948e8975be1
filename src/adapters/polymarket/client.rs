//! Polymarket HTTP Client - Gamma, CLOB and Data APIs
//!
//! Public, unauthenticated endpoints only. Query strings follow one
//! rule set: numeric `limit`/`offset` only when non-zero, boolean
//! filters always, string filters only when non-empty.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::adapters::upstream::{join_path, UpstreamHttp};
use crate::config::loader::validate_base_url;
use crate::config::{ConfigError, PolymarketConfig};
use crate::domain::polymarket::{
    ClobOrderBook, EventList, EventResult, GammaEvent, GammaMarket, ListEventsParams,
    ListMarketsParams, MarketList, MarketResult, OrderbookResult, Profile, ProfileResult,
    SearchParams, TokenPrice, WalletTradesParams, DEFAULT_TRADES_LIMIT,
};
use crate::ports::{PolymarketApi, UpstreamError, UpstreamResult};

const GAMMA: &str = "Gamma";
const CLOB: &str = "CLOB";
const DATA: &str = "Data";

type Query = Vec<(&'static str, String)>;

/// Client for the three public Polymarket APIs.
pub struct PolymarketClient {
    upstream: UpstreamHttp,
    gamma_url: Url,
    clob_url: Url,
    data_url: Url,
}

impl PolymarketClient {
    pub fn new(upstream: UpstreamHttp, config: &PolymarketConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            upstream,
            gamma_url: validate_base_url("POLYMARKET_GAMMA_URL", &config.gamma_url)?,
            clob_url: validate_base_url("POLYMARKET_CLOB_URL", &config.clob_url)?,
            data_url: validate_base_url("POLYMARKET_DATA_URL", &config.data_url)?,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        api: &'static str,
        operation: &'static str,
        url: Url,
        query: &Query,
    ) -> UpstreamResult<T> {
        let request = self.upstream.client().get(url).query(query);
        self.upstream.execute(api, operation, request).await
    }
}

/// Push `limit`/`offset` style values only when non-zero.
fn push_nonzero(query: &mut Query, key: &'static str, value: u32) {
    if value != 0 {
        query.push((key, value.to_string()));
    }
}

fn push_non_empty(query: &mut Query, key: &'static str, value: &str) {
    if !value.is_empty() {
        query.push((key, value.to_string()));
    }
}

pub(crate) fn markets_query(params: &ListMarketsParams) -> Query {
    let mut query = Query::new();
    push_nonzero(&mut query, "limit", params.limit);
    push_nonzero(&mut query, "offset", params.offset);
    query.push(("archived", params.archived.to_string()));
    query.push(("closed", params.closed.to_string()));
    query.push(("active", params.active.to_string()));
    push_non_empty(&mut query, "order", &params.order);
    push_non_empty(&mut query, "order_dir", &params.order_dir);
    query
}

pub(crate) fn events_query(params: &ListEventsParams) -> Query {
    let mut query = Query::new();
    push_nonzero(&mut query, "limit", params.limit);
    push_nonzero(&mut query, "offset", params.offset);
    query.push(("archived", params.archived.to_string()));
    query.push(("closed", params.closed.to_string()));
    if let Some(tag_id) = &params.tag_id {
        push_non_empty(&mut query, "tag_id", tag_id);
    }
    query
}

/// Gamma lists arrive either bare or wrapped under `key`.
/// Any other shape is an empty list.
fn extract_list<T: DeserializeOwned>(body: Value, key: &str) -> UpstreamResult<Vec<T>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    serde_json::from_value(Value::Array(items)).map_err(|e| UpstreamError::Decode {
        api: GAMMA,
        message: e.to_string(),
    })
}

#[async_trait]
impl PolymarketApi for PolymarketClient {
    async fn list_markets(&self, params: &ListMarketsParams) -> UpstreamResult<MarketList> {
        let url = join_path(&self.gamma_url, &["markets"]);
        let body: Value = self
            .get(GAMMA, "list_markets", url, &markets_query(params))
            .await?;
        let markets: Vec<GammaMarket> = extract_list(body, "markets")?;
        Ok(MarketList { markets })
    }

    async fn get_market(&self, condition_id: &str) -> UpstreamResult<MarketResult> {
        let url = join_path(&self.gamma_url, &["markets", condition_id]);
        let market: GammaMarket = self.get(GAMMA, "get_market", url, &Query::new()).await?;
        Ok(MarketResult { market })
    }

    async fn list_events(&self, params: &ListEventsParams) -> UpstreamResult<EventList> {
        let url = join_path(&self.gamma_url, &["events"]);
        let body: Value = self
            .get(GAMMA, "list_events", url, &events_query(params))
            .await?;
        let events: Vec<GammaEvent> = extract_list(body, "events")?;
        Ok(EventList { events })
    }

    async fn get_event(&self, slug: &str) -> UpstreamResult<EventResult> {
        let url = join_path(&self.gamma_url, &["events", slug]);
        let event: GammaEvent = self.get(GAMMA, "get_event", url, &Query::new()).await?;
        Ok(EventResult { event })
    }

    async fn get_profile(&self, wallet_address: &str) -> UpstreamResult<ProfileResult> {
        let url = join_path(&self.gamma_url, &["profiles", wallet_address]);
        let profile: Profile = self.get(GAMMA, "get_profile", url, &Query::new()).await?;
        Ok(ProfileResult { profile })
    }

    async fn search(&self, params: &SearchParams) -> UpstreamResult<Value> {
        let url = join_path(&self.gamma_url, &["search"]);
        let mut query: Query = vec![("query", params.query.clone())];
        push_nonzero(&mut query, "limit", params.limit);
        push_nonzero(&mut query, "offset", params.offset);
        self.get(GAMMA, "search", url, &query).await
    }

    async fn get_orderbook(&self, token_id: &str) -> UpstreamResult<OrderbookResult> {
        let url = join_path(&self.clob_url, &["orderbook"]);
        let query: Query = vec![("token_id", token_id.to_string())];
        let orderbook: ClobOrderBook = self.get(CLOB, "get_orderbook", url, &query).await?;
        Ok(OrderbookResult { orderbook })
    }

    async fn get_trades(&self, token_id: &str, limit: u32) -> UpstreamResult<Value> {
        let url = join_path(&self.clob_url, &["history"]);
        let limit = if limit == 0 { DEFAULT_TRADES_LIMIT } else { limit };
        let query: Query = vec![
            ("token_id", token_id.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get(CLOB, "get_trades", url, &query).await
    }

    async fn get_price(&self, token_id: &str) -> UpstreamResult<TokenPrice> {
        let url = join_path(&self.clob_url, &["price"]);
        let query: Query = vec![("token_id", token_id.to_string())];
        self.get(CLOB, "get_price", url, &query).await
    }

    async fn get_positions(&self, wallet_address: &str) -> UpstreamResult<Value> {
        let url = join_path(&self.data_url, &["positions"]);
        let query: Query = vec![("wallet", wallet_address.to_string())];
        self.get(DATA, "get_positions", url, &query).await
    }

    async fn get_wallet_trades(
        &self,
        wallet_address: &str,
        params: &WalletTradesParams,
    ) -> UpstreamResult<Value> {
        let url = join_path(&self.data_url, &["trades"]);
        let mut query: Query = vec![("wallet", wallet_address.to_string())];
        push_nonzero(&mut query, "limit", params.limit);
        push_nonzero(&mut query, "offset", params.offset);
        self.get(DATA, "get_wallet_trades", url, &query).await
    }
}
