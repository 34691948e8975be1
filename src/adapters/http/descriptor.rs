//! Root-path service descriptors.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Endpoint groups, serialized as a JSON object in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDirectory(pub &'static [(&'static str, &'static [&'static str])]);

impl Serialize for EndpointDirectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (group, paths) in self.0 {
            map.serialize_entry(group, paths)?;
        }
        map.end()
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    /// Unix milliseconds at response time.
    pub timestamp: i64,
    pub endpoints: EndpointDirectory,
}

impl ServiceDescriptor {
    pub fn healthy(service: &'static str, version: &'static str, endpoints: EndpointDirectory) -> Self {
        Self {
            service,
            version,
            status: "healthy",
            timestamp: chrono::Utc::now().timestamp_millis(),
            endpoints,
        }
    }
}

pub const KALSHI_SERVICE: &str = "kalshi-ts-service";
pub const KALSHI_VERSION: &str = "2.0.0";

pub const KALSHI_ENDPOINTS: EndpointDirectory = EndpointDirectory(&[
    ("portfolio", &["/api/balance"]),
    (
        "orders",
        &[
            "/api/orders",
            "/api/orders/:id",
            "/api/orders/create",
            "/api/orders/cancel",
            "/api/orders/amend",
        ],
    ),
    (
        "markets",
        &[
            "/api/markets",
            "/api/markets/:ticker",
            "/api/markets/:ticker/orderbook",
            "/api/markets/:ticker/trades",
        ],
    ),
    ("events", &["/api/events", "/api/events/:ticker"]),
    ("series", &["/api/series", "/api/series/:ticker"]),
    ("exchange", &["/api/exchange/status"]),
]);

pub const POLYMARKET_SERVICE: &str = "polymarket-service";
pub const POLYMARKET_VERSION: &str = "1.0.0";

pub const POLYMARKET_ENDPOINTS: EndpointDirectory = EndpointDirectory(&[
    ("markets", &["/api/markets", "/api/markets/:conditionId"]),
    ("events", &["/api/events", "/api/events/:slug"]),
    ("profiles", &["/api/profiles/:walletAddress"]),
    ("search", &["/api/search"]),
    ("orderbook", &["/api/orderbook/:tokenId"]),
    ("trades", &["/api/trades/:tokenId"]),
    ("price", &["/api/price/:tokenId"]),
    ("positions", &["/api/positions/:walletAddress"]),
    ("walletTrades", &["/api/wallet-trades/:walletAddress"]),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_keeps_declaration_order() {
        let text = serde_json::to_string(&KALSHI_ENDPOINTS).unwrap();
        let portfolio = text.find("\"portfolio\"").unwrap();
        let exchange = text.find("\"exchange\"").unwrap();
        assert!(portfolio < exchange);
        assert!(text.starts_with(r#"{"portfolio":["/api/balance"],"orders":["/api/orders","#));
    }

    #[test]
    fn test_healthy_descriptor() {
        let descriptor = ServiceDescriptor::healthy(POLYMARKET_SERVICE, POLYMARKET_VERSION, POLYMARKET_ENDPOINTS);
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["service"], "polymarket-service");
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["endpoints"]["walletTrades"][0], "/api/wallet-trades/:walletAddress");
        assert!(value["timestamp"].as_i64().unwrap() > 0);
    }
}
