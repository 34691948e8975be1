//! Response envelopes shared by every route.
//!
//! Read endpoints answer with [`Envelope`]; order mutations answer with
//! [`OrderOutcome`], whose failure variant is a business response and
//! travels with HTTP 200.

use serde::Serialize;
use serde_json::Value;

/// `{ success, data | error }` wrapper for read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying the adapter result.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope carrying a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `{ success, order | error }` wrapper for create/cancel/amend.
///
/// `error` is the upstream error body when one was returned (parsed
/// JSON if it parses), otherwise the error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOutcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl<T> OrderOutcome<T> {
    pub fn accepted(order: Option<T>) -> Self {
        Self {
            success: true,
            order,
            error: None,
        }
    }

    pub fn rejected(detail: Value) -> Self {
        Self {
            success: false,
            order: None,
            error: Some(detail),
        }
    }
}
