//! Kalshi route table.
//!
//! Every handler calls exactly one `KalshiApi` operation. Reads answer
//! with the read envelope; create, cancel and amend answer with the
//! order outcome.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;

use super::cors::cors_layer;
use super::descriptor::{ServiceDescriptor, KALSHI_ENDPOINTS, KALSHI_SERVICE, KALSHI_VERSION};
use super::query::{limit_or, non_empty, parse_count};
use super::response::{failure, metrics_response, order_response, read_response};
use crate::adapters::metrics::UpstreamMetrics;
use crate::domain::kalshi::{
    AmendOrderRequest, CreateOrderRequest, ListEventsParams, ListMarketsParams, ListOrdersParams,
    ListSeriesParams, MarketTradesParams, DEFAULT_EVENTS_LIMIT, DEFAULT_MARKETS_LIMIT,
    DEFAULT_ORDERS_LIMIT, DEFAULT_SERIES_LIMIT, DEFAULT_TRADES_LIMIT,
};
use crate::ports::KalshiApi;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct KalshiState {
    pub api: Arc<dyn KalshiApi>,
    pub metrics: Arc<UpstreamMetrics>,
}

pub fn kalshi_router(state: KalshiState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(descriptor))
        .route("/metrics", get(metrics))
        .route("/api/balance", get(get_balance))
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/:id",
            get(get_order).delete(cancel_order).put(amend_order),
        )
        .route("/api/markets", get(list_markets))
        .route("/api/markets/:ticker", get(get_market))
        .route("/api/markets/:ticker/orderbook", get(get_orderbook))
        .route("/api/markets/:ticker/trades", get(get_market_trades))
        .route("/api/events", get(list_events))
        .route("/api/events/:ticker", get(get_event))
        .route("/api/series", get(list_series))
        .route("/api/series/:ticker", get(get_series))
        .route("/api/exchange/status", get(get_exchange_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

// ── Query strings ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OrdersQuery {
    limit: Option<String>,
    cursor: Option<String>,
    market_ticker: Option<String>,
    event_ticker: Option<String>,
    series_ticker: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarketsQuery {
    limit: Option<String>,
    cursor: Option<String>,
    series_ticker: Option<String>,
    event_ticker: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderbookQuery {
    depth: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    limit: Option<String>,
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    limit: Option<String>,
    cursor: Option<String>,
    category: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesQuery {
    limit: Option<String>,
    cursor: Option<String>,
    category: Option<String>,
}

fn json_object(body: &[u8]) -> serde_json::Result<Map<String, Value>> {
    serde_json::from_slice(body)
}

// ── Handlers ────────────────────────────────────────────────

async fn descriptor() -> impl IntoResponse {
    Json(ServiceDescriptor::healthy(
        KALSHI_SERVICE,
        KALSHI_VERSION,
        KALSHI_ENDPOINTS,
    ))
}

async fn metrics(State(state): State<KalshiState>) -> Response {
    metrics_response(&state.metrics)
}

async fn get_balance(State(state): State<KalshiState>) -> Response {
    read_response(state.api.get_balance().await)
}

/// Only a body that is not a JSON object fails locally; field values
/// are Kalshi's to judge.
async fn create_order(State(state): State<KalshiState>, body: Bytes) -> Response {
    let order = match json_object(&body) {
        Ok(fields) => CreateOrderRequest(fields),
        Err(e) => return failure(e.to_string()),
    };
    order_response(state.api.create_order(&order).await)
}

async fn list_orders(
    State(state): State<KalshiState>,
    Query(query): Query<OrdersQuery>,
) -> Response {
    let params = ListOrdersParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_ORDERS_LIMIT),
        cursor: non_empty(query.cursor),
        market_ticker: non_empty(query.market_ticker),
        event_ticker: non_empty(query.event_ticker),
        series_ticker: non_empty(query.series_ticker),
        status: non_empty(query.status),
    };
    read_response(state.api.list_orders(&params).await)
}

async fn get_order(State(state): State<KalshiState>, Path(id): Path<String>) -> Response {
    read_response(state.api.get_order(&id).await)
}

async fn cancel_order(State(state): State<KalshiState>, Path(id): Path<String>) -> Response {
    order_response(state.api.cancel_order(&id).await)
}

async fn amend_order(
    State(state): State<KalshiState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let amend = match json_object(&body) {
        Ok(fields) => AmendOrderRequest::from_body(&fields),
        Err(e) => return failure(e.to_string()),
    };
    order_response(state.api.amend_order(&id, &amend).await)
}

async fn list_markets(
    State(state): State<KalshiState>,
    Query(query): Query<MarketsQuery>,
) -> Response {
    let params = ListMarketsParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_MARKETS_LIMIT),
        cursor: non_empty(query.cursor),
        event_ticker: non_empty(query.event_ticker),
        series_ticker: non_empty(query.series_ticker),
        status: non_empty(query.status),
    };
    read_response(state.api.list_markets(&params).await)
}

async fn get_market(State(state): State<KalshiState>, Path(ticker): Path<String>) -> Response {
    read_response(state.api.get_market(&ticker).await)
}

async fn get_orderbook(
    State(state): State<KalshiState>,
    Path(ticker): Path<String>,
    Query(query): Query<OrderbookQuery>,
) -> Response {
    let depth = parse_count(query.depth.as_deref());
    read_response(state.api.get_market_orderbook(&ticker, depth).await)
}

async fn get_market_trades(
    State(state): State<KalshiState>,
    Path(ticker): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let params = MarketTradesParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_TRADES_LIMIT),
        cursor: non_empty(query.cursor),
        ..MarketTradesParams::new(ticker)
    };
    read_response(state.api.get_market_trades(&params).await)
}

async fn list_events(
    State(state): State<KalshiState>,
    Query(query): Query<EventsQuery>,
) -> Response {
    let params = ListEventsParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_EVENTS_LIMIT),
        cursor: non_empty(query.cursor),
        category: non_empty(query.category),
        status: non_empty(query.status),
    };
    read_response(state.api.list_events(&params).await)
}

async fn get_event(State(state): State<KalshiState>, Path(ticker): Path<String>) -> Response {
    read_response(state.api.get_event(&ticker).await)
}

async fn list_series(
    State(state): State<KalshiState>,
    Query(query): Query<SeriesQuery>,
) -> Response {
    let params = ListSeriesParams {
        limit: limit_or(query.limit.as_deref(), DEFAULT_SERIES_LIMIT),
        cursor: non_empty(query.cursor),
        category: non_empty(query.category),
    };
    read_response(state.api.list_series(&params).await)
}

async fn get_series(State(state): State<KalshiState>, Path(ticker): Path<String>) -> Response {
    read_response(state.api.get_series(&ticker).await)
}

async fn get_exchange_status(State(state): State<KalshiState>) -> Response {
    read_response(state.api.get_exchange_status().await)
}
