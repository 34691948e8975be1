//! Upstream failure taxonomy.
//!
//! Every port operation fails with exactly one of these variants, so
//! routes match on the tag instead of probing response fields.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// The platform answered with a non-2xx status.
    #[error("{api} API error: {status}")]
    Status {
        api: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout, reset).
    #[error("{api} request failed: {message}")]
    Transport { api: &'static str, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("{api} response could not be decoded: {message}")]
    Decode { api: &'static str, message: String },

    /// The request could not be signed with the configured key.
    #[error("request signing failed: {0}")]
    Signing(String),
}

impl UpstreamError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Status { .. } => "status",
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::Decode { .. } => "decode",
            UpstreamError::Signing(_) => "signing",
        }
    }

    /// Upstream HTTP status, when there was a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Payload relayed to callers of order-mutation endpoints.
    ///
    /// The upstream body as JSON when it parses, the raw body text when
    /// it does not, and the error message when there is no body.
    pub fn detail(&self) -> Value {
        match self {
            UpstreamError::Status { body, .. } if !body.trim().is_empty() => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            other => Value::String(other.to_string()),
        }
    }
}
