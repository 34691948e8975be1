//! Polymarket route table. All endpoints are reads.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use super::cors::cors_layer;
use super::descriptor::{
    ServiceDescriptor, POLYMARKET_ENDPOINTS, POLYMARKET_SERVICE, POLYMARKET_VERSION,
};
use super::query::{flag, limit_or, non_empty, offset_or_zero};
use super::response::{metrics_response, read_response};
use crate::adapters::metrics::UpstreamMetrics;
use crate::domain::polymarket::{
    ListEventsParams, ListMarketsParams, SearchParams, WalletTradesParams, DEFAULT_LIST_LIMIT,
    DEFAULT_MARKET_ORDER, DEFAULT_ORDER_DIR, DEFAULT_SEARCH_LIMIT, DEFAULT_TRADES_LIMIT,
};
use crate::ports::PolymarketApi;

#[derive(Clone)]
pub struct PolymarketState {
    pub api: Arc<dyn PolymarketApi>,
    pub metrics: Arc<UpstreamMetrics>,
}

pub fn polymarket_router(state: PolymarketState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(descriptor))
        .route("/metrics", get(metrics))
        .route("/api/markets", get(list_markets))
        .route("/api/markets/:condition_id", get(get_market))
        .route("/api/events", get(list_events))
        .route("/api/events/:slug", get(get_event))
        .route("/api/profiles/:wallet_address", get(get_profile))
        .route("/api/search", get(search))
        .route("/api/orderbook/:token_id", get(get_orderbook))
        .route("/api/trades/:token_id", get(get_trades))
        .route("/api/price/:token_id", get(get_price))
        .route("/api/positions/:wallet_address", get(get_positions))
        .route("/api/wallet-trades/:wallet_address", get(get_wallet_trades))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct MarketsQuery {
    limit: Option<String>,
    offset: Option<String>,
    archived: Option<String>,
    closed: Option<String>,
    active: Option<String>,
    order: Option<String>,
    order_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    limit: Option<String>,
    offset: Option<String>,
    archived: Option<String>,
    closed: Option<String>,
    tag_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    limit: Option<String>,
    offset: Option<String>,
}

async fn descriptor() -> impl IntoResponse {
    Json(ServiceDescriptor::healthy(
        POLYMARKET_SERVICE,
        POLYMARKET_VERSION,
        POLYMARKET_ENDPOINTS,
    ))
}

async fn metrics(State(state): State<PolymarketState>) -> Response {
    metrics_response(&state.metrics)
}

async fn list_markets(
    State(state): State<PolymarketState>,
    Query(query): Query<MarketsQuery>,
) -> Response {
    let params = ListMarketsParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_LIST_LIMIT),
        offset: offset_or_zero(query.offset.as_deref()),
        archived: flag(query.archived.as_deref()),
        closed: flag(query.closed.as_deref()),
        active: flag(query.active.as_deref()),
        order: non_empty(query.order).unwrap_or_else(|| DEFAULT_MARKET_ORDER.to_string()),
        order_dir: non_empty(query.order_dir).unwrap_or_else(|| DEFAULT_ORDER_DIR.to_string()),
    };
    read_response(state.api.list_markets(&params).await)
}

async fn get_market(
    State(state): State<PolymarketState>,
    Path(condition_id): Path<String>,
) -> Response {
    read_response(state.api.get_market(&condition_id).await)
}

async fn list_events(
    State(state): State<PolymarketState>,
    Query(query): Query<EventsQuery>,
) -> Response {
    let params = ListEventsParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_LIST_LIMIT),
        offset: offset_or_zero(query.offset.as_deref()),
        archived: flag(query.archived.as_deref()),
        closed: flag(query.closed.as_deref()),
        tag_id: non_empty(query.tag_id),
    };
    read_response(state.api.list_events(&params).await)
}

async fn get_event(State(state): State<PolymarketState>, Path(slug): Path<String>) -> Response {
    read_response(state.api.get_event(&slug).await)
}

async fn get_profile(
    State(state): State<PolymarketState>,
    Path(wallet_address): Path<String>,
) -> Response {
    read_response(state.api.get_profile(&wallet_address).await)
}

async fn search(
    State(state): State<PolymarketState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let params = SearchParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_SEARCH_LIMIT),
        offset: offset_or_zero(query.offset.as_deref()),
        ..SearchParams::new(query.q.unwrap_or_default())
    };
    read_response(state.api.search(&params).await)
}

async fn get_orderbook(
    State(state): State<PolymarketState>,
    Path(token_id): Path<String>,
) -> Response {
    read_response(state.api.get_orderbook(&token_id).await)
}

async fn get_trades(
    State(state): State<PolymarketState>,
    Path(token_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let limit = limit_or(query.limit.as_deref(), DEFAULT_TRADES_LIMIT);
    read_response(state.api.get_trades(&token_id, limit).await)
}

async fn get_price(State(state): State<PolymarketState>, Path(token_id): Path<String>) -> Response {
    read_response(state.api.get_price(&token_id).await)
}

async fn get_positions(
    State(state): State<PolymarketState>,
    Path(wallet_address): Path<String>,
) -> Response {
    read_response(state.api.get_positions(&wallet_address).await)
}

async fn get_wallet_trades(
    State(state): State<PolymarketState>,
    Path(wallet_address): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let params = WalletTradesParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_TRADES_LIMIT),
        offset: offset_or_zero(query.offset.as_deref()),
    };
    read_response(state.api.get_wallet_trades(&wallet_address, &params).await)
}
