use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the public API id
pub const API_ID_HEADER: &str = "API-ID";
/// Header carrying the hex request signature
pub const API_SIGN_HEADER: &str = "API-SIGN";

/// Result type for signing operations: authentication headers to attach
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// The signer sees the final serialized body, so anything it authenticates
/// (including the timestamp) must already be inside `body`.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to attach
    ///
    /// # Arguments
    /// * `method` - Trade API method name (`info`, `order_create`, ...)
    /// * `body` - Serialized request body
    fn sign_request(&self, method: &str, body: &[u8]) -> SignatureResult;
}

/// HMAC-SHA256 signer over `method || body`
pub struct HmacSigner {
    api_id: String,
    secret_key: Secret<String>,
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("api_id", &self.api_id)
            .finish_non_exhaustive()
    }
}

impl HmacSigner {
    /// Create a new HMAC signer
    ///
    /// # Arguments
    /// * `api_id` - Public API id issued by the exchange
    /// * `secret_key` - Secret key used as the HMAC key
    pub fn new(api_id: String, secret_key: String) -> Self {
        Self {
            api_id,
            secret_key: Secret::new(secret_key),
        }
    }

    /// Lowercase hex HMAC-SHA256 of `method` immediately followed by `body`
    pub fn signature(&self, method: &str, body: &[u8]) -> Result<String, ExchangeError> {
        sign_payload(self.secret_key.expose_secret(), method, body)
    }
}

impl Signer for HmacSigner {
    fn sign_request(&self, method: &str, body: &[u8]) -> SignatureResult {
        let signature = self.signature(method, body)?;

        let mut headers = HashMap::new();
        headers.insert(API_ID_HEADER.to_string(), self.api_id.clone());
        headers.insert(API_SIGN_HEADER.to_string(), signature);

        Ok(headers)
    }
}

/// Compute `hex(HMAC-SHA256(secret, method ++ body))` with no delimiter
pub fn sign_payload(secret: &str, method: &str, body: &[u8]) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;

    mac.update(method.as_bytes());
    mac.update(body);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret";

    #[test]
    fn test_sign_payload_known_vector() {
        let signature = sign_payload(SECRET, "time", br#"{"ts":1700000000000}"#).unwrap();
        assert_eq!(
            signature,
            "d1ed8d5fdd9a3c99c2b164607a9ddcf38f664a0cadc4019ede865b6f529608af"
        );
    }

    #[test]
    fn test_method_and_body_are_concatenated() {
        let joined = sign_payload(SECRET, "", br#"ticker{"pair":"BTC_USDT","ts":1700000000000}"#)
            .unwrap();
        let split =
            sign_payload(SECRET, "ticker", br#"{"pair":"BTC_USDT","ts":1700000000000}"#).unwrap();

        assert_eq!(joined, split);
        assert_eq!(
            split,
            "281e50324b8790e00c913c51cf602c3c95e98ae71314af4fdc7c403ba5fd24e0"
        );
    }

    #[test]
    fn test_any_byte_change_changes_signature() {
        let base = sign_payload(SECRET, "info", br#"{"ts":1}"#).unwrap();

        assert_ne!(base, sign_payload(SECRET, "infO", br#"{"ts":1}"#).unwrap());
        assert_ne!(base, sign_payload(SECRET, "info", br#"{"ts":2}"#).unwrap());
        assert_ne!(base, sign_payload("other", "info", br#"{"ts":1}"#).unwrap());
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = sign_payload(SECRET, "account", b"{}").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_hmac_signer_headers() {
        let signer = HmacSigner::new("my-api-id".to_string(), SECRET.to_string());
        let headers = signer
            .sign_request("time", br#"{"ts":1700000000000}"#)
            .unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(API_ID_HEADER).map(String::as_str), Some("my-api-id"));
        assert_eq!(
            headers.get(API_SIGN_HEADER).map(String::as_str),
            Some("d1ed8d5fdd9a3c99c2b164607a9ddcf38f664a0cadc4019ede865b6f529608af")
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = HmacSigner::new("id".to_string(), "super-secret".to_string());
        assert!(!format!("{:?}", signer).contains("super-secret"));
    }
}
