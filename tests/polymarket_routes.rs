//! Polymarket Route Tests - Router Behaviour Against a Mocked Port

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;

use prediction_market_gateway::adapters::http::{polymarket_router, PolymarketState};
use prediction_market_gateway::adapters::metrics::UpstreamMetrics;
use prediction_market_gateway::config::ServerConfig;
use prediction_market_gateway::domain::polymarket::*;
use prediction_market_gateway::ports::{PolymarketApi, UpstreamError, UpstreamResult};

mock! {
    pub Polymarket {}

    #[async_trait::async_trait]
    impl PolymarketApi for Polymarket {
        async fn list_markets(&self, params: &ListMarketsParams) -> UpstreamResult<MarketList>;
        async fn get_market(&self, condition_id: &str) -> UpstreamResult<MarketResult>;
        async fn list_events(&self, params: &ListEventsParams) -> UpstreamResult<EventList>;
        async fn get_event(&self, slug: &str) -> UpstreamResult<EventResult>;
        async fn get_profile(&self, wallet_address: &str) -> UpstreamResult<ProfileResult>;
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
}

fn app(mock: MockPolymarket) -> Router {
    let state = PolymarketState {
        api: Arc::new(mock),
        metrics: Arc::new(UpstreamMetrics::new().unwrap()),
    };
    polymarket_router(state, &ServerConfig::default().cors_origins)
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_markets_defaults() {
    let mut mock = MockPolymarket::new();
    mock.expect_list_markets()
        .withf(|params: &ListMarketsParams| *params == ListMarketsParams::default())
        .times(1)
        .returning(|_| Ok(MarketList::default()));

    let (status, body) = call(app(mock), "/api/markets").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": {"markets": []}}));
}

#[tokio::test]
async fn test_list_markets_flags_are_literal_true_only() {
    let mut mock = MockPolymarket::new();
    mock.expect_list_markets()
        .withf(|params: &ListMarketsParams| {
            params.archived
                && !params.closed
                && !params.active
                && params.limit == 5
                && params.offset == 10
                && params.order == "liquidity"
                && params.order_dir == "desc"
        })
        .times(1)
        .returning(|_| Ok(MarketList::default()));

    let (status, _) = call(
        app(mock),
        "/api/markets?archived=true&closed=1&active=TRUE&limit=5&offset=10&order=liquidity",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_gamma_failure_is_500() {
    let mut mock = MockPolymarket::new();
    mock.expect_get_market()
        .withf(|id: &str| id == "0xdeadbeef")
        .returning(|_| {
            Err(UpstreamError::Status {
                api: "Gamma",
                status: StatusCode::NOT_FOUND,
                body: "not found".to_string(),
            })
        });

    let (status, body) = call(app(mock), "/api/markets/0xdeadbeef").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "Gamma API error: 404 Not Found"})
    );
}

#[tokio::test]
async fn test_list_events_with_tag() {
    let mut mock = MockPolymarket::new();
    mock.expect_list_events()
        .withf(|params: &ListEventsParams| {
            params.limit == 50 && params.offset == 0 && params.tag_id.as_deref() == Some("100381")
        })
        .times(1)
        .returning(|_| {
            Ok(EventList {
                events: vec![GammaEvent {
                    slug: Some("fed-decision-in-december".to_string()),
                    ..Default::default()
                }],
            })
        });

    let (status, body) = call(app(mock), "/api/events?tag_id=100381&limit=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["events"][0]["slug"], "fed-decision-in-december");
}

#[tokio::test]
async fn test_search_defaults() {
    let mut mock = MockPolymarket::new();
    mock.expect_search()
        .withf(|params: &SearchParams| params.query.is_empty() && params.limit == 20 && params.offset == 0)
        .times(1)
        .returning(|_| Ok(json!({"events": [], "profiles": []})));

    let (status, body) = call(app(mock), "/api/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"events": [], "profiles": []}));
}

#[tokio::test]
async fn test_trades_default_limit() {
    let mut mock = MockPolymarket::new();
    mock.expect_get_trades()
        .withf(|token: &str, limit: &u32| token == "7132" && *limit == 100)
        .times(1)
        .returning(|_, _| Ok(json!([])));

    let (status, body) = call(app(mock), "/api/trades/7132").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));
}

#[tokio::test]
async fn test_price_and_orderbook() {
    let mut mock = MockPolymarket::new();
    mock.expect_get_price().returning(|_| {
        Ok(TokenPrice {
            price: Some(Quantity::Text("0.55".to_string())),
        })
    });
    mock.expect_get_orderbook().returning(|_| {
        Ok(OrderbookResult {
            orderbook: ClobOrderBook {
                asset_id: Some("7132".to_string()),
                bids: Some(vec![BookLevel {
                    price: Some(Quantity::Text("0.54".to_string())),
                    size: Some(Quantity::Text("200".to_string())),
                    ..Default::default()
                }]),
                ..Default::default()
            },
        })
    });

    let app = app(mock);
    let (status, body) = call(app.clone(), "/api/price/7132").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": {"price": "0.55"}}));

    let (status, body) = call(app, "/api/orderbook/7132").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["orderbook"],
        json!({"asset_id": "7132", "bids": [{"price": "0.54", "size": "200"}]})
    );
}

#[tokio::test]
async fn test_wallet_endpoints() {
    let wallet = "0x56687bf447db6ffa42ffe2204a05edaa20f55839";
    let mut mock = MockPolymarket::new();
    mock.expect_get_positions()
        .withf(move |w: &str| w == wallet)
        .returning(|_| Ok(json!([{"asset": "7132", "size": 12.5}])));
    mock.expect_get_wallet_trades()
        .withf(move |w: &str, params: &WalletTradesParams| {
            w == wallet && params.limit == 25 && params.offset == 0
        })
        .returning(|_, _| Ok(json!([])));
    mock.expect_get_profile().returning(|_| {
        Ok(ProfileResult {
            profile: Profile {
                username: Some("whale".to_string()),
                profit_loss: serde_json::from_value(json!(1520.25)).unwrap(),
                ..Default::default()
            },
        })
    });

    let app = app(mock);
    let (status, body) = call(app.clone(), &format!("/api/positions/{wallet}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["size"], 12.5);

    let (status, _) = call(app.clone(), &format!("/api/wallet-trades/{wallet}?limit=25&offset=x")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(app, &format!("/api/profiles/{wallet}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["profile"],
        json!({"username": "whale", "profit_loss": 1520.25})
    );
}

#[tokio::test]
async fn test_root_descriptor() {
    let (status, body) = call(app(MockPolymarket::new()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "polymarket-service");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["status"], "healthy");
    assert_eq!(
        body["endpoints"]["markets"],
        json!(["/api/markets", "/api/markets/:conditionId"])
    );
    assert_eq!(body["endpoints"]["search"], json!(["/api/search"]));
    assert_eq!(body.get("endpoints").unwrap().as_object().unwrap().len(), 9);
}
