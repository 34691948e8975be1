//! Kalshi Authentication — RSA-PSS Request Signing
//!
//! Every authenticated request carries three headers:
//! `KALSHI-ACCESS-KEY`, `KALSHI-ACCESS-TIMESTAMP` (Unix ms) and
//! `KALSHI-ACCESS-SIGNATURE`, the base64 RSA-PSS/SHA-256 signature of
//! `timestamp + METHOD + path`. The path is the full URL path including
//! the `/trade-api/v2` prefix, without the query string.

use std::fmt;
use std::path::Path;

use base64::Engine;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::pss::BlindedSigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::config::ConfigError;
use crate::ports::{UpstreamError, UpstreamResult};

pub const ACCESS_KEY_HEADER: &str = "KALSHI-ACCESS-KEY";
pub const ACCESS_TIMESTAMP_HEADER: &str = "KALSHI-ACCESS-TIMESTAMP";
pub const ACCESS_SIGNATURE_HEADER: &str = "KALSHI-ACCESS-SIGNATURE";

/// Kalshi API key id plus the RSA key that signs for it.
///
/// The private key never leaves this struct; `Debug` prints only the
/// key id.
pub struct KalshiAuth {
    key_id: String,
    signing_key: BlindedSigningKey<Sha256>,
}

impl KalshiAuth {
    /// Parse a PEM private key, PKCS#8 first, then PKCS#1.
    pub fn from_pem(key_id: impl Into<String>, pem: &str) -> Result<Self, String> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|pkcs8_err| {
                RsaPrivateKey::from_pkcs1_pem(pem)
                    .map_err(|pkcs1_err| format!("not PKCS#8 ({pkcs8_err}) or PKCS#1 ({pkcs1_err})"))
            })?;

        Ok(Self {
            key_id: key_id.into(),
            signing_key: BlindedSigningKey::<Sha256>::new(private_key),
        })
    }

    /// Read and parse the key file. Called once at startup.
    pub fn from_pem_file(key_id: impl Into<String>, path: &Path) -> Result<Self, ConfigError> {
        let key_error = |reason: String| ConfigError::PrivateKey {
            path: path.to_path_buf(),
            reason,
        };
        let pem = std::fs::read_to_string(path).map_err(|e| key_error(e.to_string()))?;
        Self::from_pem(key_id, &pem).map_err(key_error)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Current Unix time in milliseconds, as sent in the timestamp header.
    pub fn timestamp_ms() -> String {
        chrono::Utc::now().timestamp_millis().to_string()
    }

    /// Sign `timestamp + METHOD + path`.
    pub fn sign(&self, timestamp: &str, method: &str, path: &str) -> UpstreamResult<String> {
        let message = format!("{timestamp}{}{path}", method.to_ascii_uppercase());
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut rand::thread_rng(), message.as_bytes())
            .map_err(|e| UpstreamError::Signing(e.to_string()))?;
        Ok(base64::engine::general_purpose::STANDARD.encode(signature.to_bytes()))
    }

    /// All three auth headers for a request, stamped now.
    pub fn headers(&self, method: &str, path: &str) -> UpstreamResult<[(&'static str, String); 3]> {
        let timestamp = Self::timestamp_ms();
        let signature = self.sign(&timestamp, method, path)?;
        Ok([
            (ACCESS_KEY_HEADER, self.key_id.clone()),
            (ACCESS_TIMESTAMP_HEADER, timestamp),
            (ACCESS_SIGNATURE_HEADER, signature),
        ])
    }
}

impl fmt::Debug for KalshiAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KalshiAuth")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pss::{Signature, VerifyingKey};
    use rsa::signature::Verifier;
    use rsa::RsaPublicKey;

    const PKCS8_PEM: &str = include_str!("../../../tests/fixtures/kalshi_test_key.pem");
    const PKCS1_PEM: &str = include_str!("../../../tests/fixtures/kalshi_test_key_pkcs1.pem");

    fn verify(pem: &str, message: &str, signature_b64: &str) -> bool {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem).unwrap();
        let verifying_key = VerifyingKey::<Sha256>::new(RsaPublicKey::from(&private_key));
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(signature_b64)
            .unwrap();
        let signature = Signature::try_from(bytes.as_slice()).unwrap();
        verifying_key.verify(message.as_bytes(), &signature).is_ok()
    }

    #[test]
    fn test_signature_verifies_over_timestamp_method_path() {
        let auth = KalshiAuth::from_pem("key-1", PKCS8_PEM).unwrap();
        let signature = auth
            .sign("1703123456789", "get", "/trade-api/v2/portfolio/balance")
            .unwrap();

        assert!(verify(
            PKCS8_PEM,
            "1703123456789GET/trade-api/v2/portfolio/balance",
            &signature
        ));
        assert!(!verify(
            PKCS8_PEM,
            "1703123456789GET/trade-api/v2/portfolio/orders",
            &signature
        ));
    }

    #[test]
    fn test_pkcs1_key_is_accepted() {
        let auth = KalshiAuth::from_pem("key-1", PKCS1_PEM).unwrap();
        let signature = auth.sign("1", "DELETE", "/trade-api/v2/portfolio/orders/abc").unwrap();
        assert!(verify(
            PKCS8_PEM,
            "1DELETE/trade-api/v2/portfolio/orders/abc",
            &signature
        ));
    }

    #[test]
    fn test_garbage_key_is_rejected() {
        assert!(KalshiAuth::from_pem("key-1", "-----BEGIN NONSENSE-----").is_err());
    }

    #[test]
    fn test_missing_key_file_is_config_error() {
        let result = KalshiAuth::from_pem_file("key-1", Path::new("/nonexistent/kalshi.pem"));
        assert!(matches!(result, Err(ConfigError::PrivateKey { .. })));
    }

    #[test]
    fn test_headers_and_debug() {
        let auth = KalshiAuth::from_pem("key-1", PKCS8_PEM).unwrap();
        let headers = auth.headers("GET", "/trade-api/v2/exchange/status").unwrap();
        assert_eq!(headers[0], (ACCESS_KEY_HEADER, "key-1".to_string()));
        assert!(headers[1].1.parse::<i64>().unwrap() > 1_600_000_000_000);
        assert!(!format!("{auth:?}").contains("PRIVATE"));
    }
}
