//! Configuration Loader - File Loading, Env Overrides and Validation
//!
//! Reads `config.toml` (or the file named by `CONFIG_PATH`) when present,
//! applies environment overrides and validates the result. Environment
//! access goes through a lookup closure so tests never touch the
//! process environment.

use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::debug;

use super::{ConfigError, ServiceConfig, ServiceKind};

/// File read when `CONFIG_PATH` is not set. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Load, override and validate configuration for `kind`.
///
/// `lookup` resolves environment variables; empty values count as unset.
///
/// # Errors
/// - `CONFIG_PATH` names a file that cannot be read or parsed
/// - `PORT` or `LOG_FORMAT` is malformed
/// - an upstream base URL does not parse
/// - `KALSHI_API_KEY_ID` is set without `KALSHI_PRIVATE_KEY_PATH`
pub fn load_config<F>(kind: ServiceKind, lookup: F) -> Result<ServiceConfig, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

  let mut config = match env("CONFIG_PATH") {
    Some(path) => load_file(Path::new(&path))?,
    None => {
      let default = Path::new(DEFAULT_CONFIG_FILE);
      if default.exists() {
        load_file(default)?
      } else {
        ServiceConfig::default()
      }
    }
  };

  apply_env_overrides(&mut config, &env)?;
  validate_config(kind, &config)?;

  debug!(
    ?kind,
    port = config.port(kind),
    timeout = ?config.upstream.timeout(),
    "Configuration loaded"
  );

  Ok(config)
}

/// Parse a TOML configuration file.
pub fn load_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
  let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  toml::from_str(&content).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

fn apply_env_overrides<F>(config: &mut ServiceConfig, env: &F) -> Result<(), ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(port) = env("PORT") {
    let parsed = port
      .trim()
      .parse::<u16>()
      .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
    config.server.port = Some(parsed);
  }

  if let Some(format) = env("LOG_FORMAT") {
    config.logging.format = format.parse()?;
  }

  if let Some(base_url) = env("KALSHI_BASE_URL") {
    config.kalshi.base_url = base_url;
  }
  if let Some(key_id) = env("KALSHI_API_KEY_ID") {
    config.kalshi.api_key_id = Some(key_id);
  }
  if let Some(path) = env("KALSHI_PRIVATE_KEY_PATH") {
    config.kalshi.private_key_path = Some(PathBuf::from(path));
  }

  if let Some(url) = env("POLYMARKET_GAMMA_URL") {
    config.polymarket.gamma_url = url;
  }
  if let Some(url) = env("POLYMARKET_CLOB_URL") {
    config.polymarket.clob_url = url;
  }
  if let Some(url) = env("POLYMARKET_DATA_URL") {
    config.polymarket.data_url = url;
  }

  Ok(())
}

/// Validate the sections the given service actually uses.
fn validate_config(kind: ServiceKind, config: &ServiceConfig) -> Result<(), ConfigError> {
  if config.server.port == Some(0) {
    return Err(ConfigError::InvalidPort("0".to_string()));
  }

  match kind {
    ServiceKind::Kalshi => {
      validate_base_url("KALSHI_BASE_URL", &config.kalshi.base_url)?;
      config.kalshi.credentials()?;
    }
    ServiceKind::Polymarket => {
      validate_base_url("POLYMARKET_GAMMA_URL", &config.polymarket.gamma_url)?;
      validate_base_url("POLYMARKET_CLOB_URL", &config.polymarket.clob_url)?;
      validate_base_url("POLYMARKET_DATA_URL", &config.polymarket.data_url)?;
    }
  }

  Ok(())
}

/// Parse a base URL that path segments can be appended to.
pub fn validate_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
  let invalid = |reason: String| ConfigError::InvalidUrl {
    key,
    url: raw.to_string(),
    reason,
  };
  let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
  if url.cannot_be_a_base() {
    return Err(invalid("URL cannot carry a path".to_string()));
  }
  Ok(url)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::io::Write;

  use super::*;
  use crate::config::{KalshiCredentials, LogFormat};

  fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config(
      ServiceKind::Polymarket,
      lookup(&[("CONFIG_PATH", "nonexistent.toml")]),
    );
    assert!(matches!(result, Err(ConfigError::Io { .. })));
  }

  #[test]
  fn test_port_from_env() {
    let config = load_config(ServiceKind::Kalshi, lookup(&[("PORT", "8080")])).unwrap();
    assert_eq!(config.port(ServiceKind::Kalshi), 8080);
  }

  #[test]
  fn test_invalid_port_is_rejected() {
    let result = load_config(ServiceKind::Kalshi, lookup(&[("PORT", "http")]));
    assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
  }

  #[test]
  fn test_key_id_without_key_path_aborts() {
    let result = load_config(
      ServiceKind::Kalshi,
      lookup(&[("KALSHI_API_KEY_ID", "a952bcbe-ec3b-4b5b-b8f9-11dae589608c")]),
    );
    assert!(matches!(result, Err(ConfigError::MissingPrivateKeyPath)));
  }

  #[test]
  fn test_no_key_id_is_unauthenticated() {
    let config = load_config(ServiceKind::Kalshi, lookup(&[])).unwrap();
    assert_eq!(config.kalshi.credentials().unwrap(), None);
    assert_eq!(config.kalshi.base_url, crate::config::KALSHI_DEFAULT_BASE_URL);
  }

  #[test]
  fn test_empty_key_id_counts_as_unset() {
    let config = load_config(ServiceKind::Kalshi, lookup(&[("KALSHI_API_KEY_ID", "")])).unwrap();
    assert_eq!(config.kalshi.credentials().unwrap(), None);
  }

  #[test]
  fn test_credentials_from_env() {
    let config = load_config(
      ServiceKind::Kalshi,
      lookup(&[
        ("KALSHI_API_KEY_ID", "key-1"),
        ("KALSHI_PRIVATE_KEY_PATH", "/run/secrets/kalshi.pem"),
      ]),
    )
    .unwrap();
    assert_eq!(
      config.kalshi.credentials().unwrap(),
      Some(KalshiCredentials {
        key_id: "key-1".to_string(),
        private_key_path: PathBuf::from("/run/secrets/kalshi.pem"),
      })
    );
  }

  #[test]
  fn test_bad_base_url_is_rejected() {
    let result = load_config(
      ServiceKind::Polymarket,
      lookup(&[("POLYMARKET_CLOB_URL", "mailto:ops@example.com")]),
    );
    assert!(matches!(result, Err(ConfigError::InvalidUrl { key: "POLYMARKET_CLOB_URL", .. })));
  }

  #[test]
  fn test_file_then_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
      file,
      r#"
[server]
port = 4000
cors_origins = ["https://dash.example.com"]

[logging]
level = "debug"
format = "pretty"

[upstream]
timeout_seconds = 15

[polymarket]
gamma_url = "http://127.0.0.1:9100"
"#
    )
    .unwrap();
    let path = file.path().to_string_lossy().to_string();

    let config = load_config(
      ServiceKind::Polymarket,
      lookup(&[("CONFIG_PATH", path.as_str()), ("PORT", "4001")]),
    )
    .unwrap();

    assert_eq!(config.port(ServiceKind::Polymarket), 4001);
    assert_eq!(config.server.cors_origins, vec!["https://dash.example.com"]);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.upstream.timeout(), Some(std::time::Duration::from_secs(15)));
    assert_eq!(config.polymarket.gamma_url, "http://127.0.0.1:9100");
    assert_eq!(config.polymarket.clob_url, crate::config::CLOB_DEFAULT_URL);
  }

  #[test]
  fn test_example_config_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
    let config = load_file(&path).unwrap();
    assert_eq!(config.server.port, None);
    assert_eq!(config.kalshi.credentials().unwrap(), None);
    assert_eq!(config.polymarket.data_url, crate::config::DATA_DEFAULT_URL);
  }
}
