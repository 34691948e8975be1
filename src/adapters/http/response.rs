//! Envelope responses.
//!
//! Read endpoints map adapter failures to HTTP 500. Order mutations
//! always answer 200 and report failure inside the body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::adapters::metrics::UpstreamMetrics;
use crate::domain::kalshi::{KalshiOrder, OrderResult};
use crate::domain::{Envelope, OrderOutcome};
use crate::ports::UpstreamResult;

pub fn read_response<T: Serialize>(result: UpstreamResult<T>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(Envelope::ok(data))).into_response(),
        Err(e) => failure(e.to_string()),
    }
}

pub fn order_response(result: UpstreamResult<OrderResult>) -> Response {
    let outcome = match result {
        Ok(result) => OrderOutcome::accepted(result.order),
        Err(e) => OrderOutcome::<KalshiOrder>::rejected(e.detail()),
    };
    (StatusCode::OK, Json(outcome)).into_response()
}

/// HTTP 500 with `{success: false, error}`.
pub fn failure(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::<()>::failure(message)),
    )
        .into_response()
}

pub fn metrics_response(metrics: &UpstreamMetrics) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
        .into_response()
}
