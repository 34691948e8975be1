//! Configuration Module - TOML + Environment Service Configuration
//!
//! Loads an optional `config.toml` and layers environment variable
//! overrides on top (`PORT`, `KALSHI_*`, `POLYMARKET_*`, `LOG_FORMAT`).
//! Upstream base URLs live here - nothing is hardcoded in the adapters.

pub mod loader;

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Production Kalshi Trade API base URL.
pub const KALSHI_DEFAULT_BASE_URL: &str = "https://api.elections.kalshi.com/trade-api/v2";
/// Polymarket market discovery API.
pub const GAMMA_DEFAULT_URL: &str = "https://gamma-api.polymarket.com";
/// Polymarket order book API.
pub const CLOB_DEFAULT_URL: &str = "https://clob.polymarket.com";
/// Polymarket public wallet data API.
pub const DATA_DEFAULT_URL: &str = "https://data-api.polymarket.com";

/// Which proxy this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
  Kalshi,
  Polymarket,
}

impl ServiceKind {
  /// Listening port when `PORT` is not set.
  pub fn default_port(self) -> u16 {
    match self {
      ServiceKind::Kalshi => 3000,
      ServiceKind::Polymarket => 3001,
    }
  }
}

/// Configuration failures. All of them abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("KALSHI_PRIVATE_KEY_PATH required when API key is provided")]
  MissingPrivateKeyPath,

  #[error("failed to load Kalshi private key {path}: {reason}")]
  PrivateKey { path: PathBuf, reason: String },

  #[error("invalid port {0:?}")]
  InvalidPort(String),

  #[error("invalid value {value:?} for {key}")]
  InvalidValue { key: &'static str, value: String },

  #[error("invalid URL {url:?} for {key}: {reason}")]
  InvalidUrl {
    key: &'static str,
    url: String,
    reason: String,
  },

  #[error("failed to read config file {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  /// Listener and CORS settings.
  pub server: ServerConfig,
  /// Log filter and output format.
  pub logging: LoggingConfig,
  /// Outbound HTTP client settings.
  pub upstream: UpstreamConfig,
  /// Kalshi endpoint and credentials.
  pub kalshi: KalshiConfig,
  /// Polymarket endpoints.
  pub polymarket: PolymarketConfig,
}

impl ServiceConfig {
  /// Port to bind for the given service.
  pub fn port(&self, kind: ServiceKind) -> u16 {
    self.server.port.unwrap_or_else(|| kind.default_port())
  }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Bind host.
  pub host: String,
  /// Bind port; the service default applies when unset.
  pub port: Option<u16>,
  /// Browser origins allowed by the CORS layer.
  pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: "0.0.0.0".to_string(),
      port: None,
      cors_origins: default_cors_origins(),
    }
  }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// One JSON object per line.
  #[default]
  Json,
  /// Human-readable multi-line output for local runs.
  Pretty,
}

impl std::str::FromStr for LogFormat {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "json" => Ok(LogFormat::Json),
      "pretty" => Ok(LogFormat::Pretty),
      _ => Err(ConfigError::InvalidValue {
        key: "LOG_FORMAT",
        value: s.to_string(),
      }),
    }
  }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Default filter (trace, debug, info, warn, error). `RUST_LOG` wins.
  pub level: String,
  pub format: LogFormat,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      format: LogFormat::Json,
    }
  }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
  /// Whole-request timeout in seconds. Unset leaves reqwest's default (none).
  pub timeout_seconds: Option<u64>,
}

impl UpstreamConfig {
  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_seconds.map(Duration::from_secs)
  }
}

/// Kalshi endpoint and API key configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KalshiConfig {
  /// Trade API base URL, including the `/trade-api/v2` prefix.
  pub base_url: String,
  /// API key id. Absent means unauthenticated mode.
  pub api_key_id: Option<String>,
  /// PEM private key matching `api_key_id`.
  pub private_key_path: Option<PathBuf>,
}

impl Default for KalshiConfig {
  fn default() -> Self {
    Self {
      base_url: KALSHI_DEFAULT_BASE_URL.to_string(),
      api_key_id: None,
      private_key_path: None,
    }
  }
}

/// Key id and key file for signed Kalshi requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KalshiCredentials {
  pub key_id: String,
  pub private_key_path: PathBuf,
}

impl KalshiConfig {
  /// Resolve credentials.
  ///
  /// `Ok(None)` means unauthenticated mode. A key id without a key
  /// path is an error; it never degrades to unauthenticated mode.
  pub fn credentials(&self) -> Result<Option<KalshiCredentials>, ConfigError> {
    let Some(key_id) = self.api_key_id.as_ref().filter(|k| !k.is_empty()) else {
      return Ok(None);
    };
    let private_key_path = self
      .private_key_path
      .clone()
      .filter(|p| !p.as_os_str().is_empty())
      .ok_or(ConfigError::MissingPrivateKeyPath)?;
    Ok(Some(KalshiCredentials {
      key_id: key_id.clone(),
      private_key_path,
    }))
  }
}

/// Polymarket endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolymarketConfig {
  pub gamma_url: String,
  pub clob_url: String,
  pub data_url: String,
}

impl Default for PolymarketConfig {
  fn default() -> Self {
    Self {
      gamma_url: GAMMA_DEFAULT_URL.to_string(),
      clob_url: CLOB_DEFAULT_URL.to_string(),
      data_url: DATA_DEFAULT_URL.to_string(),
    }
  }
}

fn default_cors_origins() -> Vec<String> {
  ["http://localhost:3000", "http://localhost:8888", "http://localhost:3001"]
    .into_iter()
    .map(String::from)
    .collect()
}
