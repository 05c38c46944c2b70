use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::Signer;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Body field carrying the request timestamp in milliseconds
pub const TIMESTAMP_FIELD: &str = "ts";

/// Path prefix of the trade API
pub const TRADE_API_PATH: &str = "/api/trade/";

/// A fully prepared request, ready for a single POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Trade API method name, also the last URL segment
    pub method: String,
    pub url: String,
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
    /// Timestamp injected into the body
    pub ts: i64,
}

impl SignedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Body decoded back into a JSON object
    pub fn body_json(&self) -> Result<Map<String, Value>, ExchangeError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ExchangeError::DeserializationError(format!("Invalid request body: {}", e)))
    }
}

/// Builds signed trade API requests
///
/// The body is the caller's params with `ts` set to the current time, serialized
/// by `serde_json`. Key order is whatever `serde_json::Map` yields (sorted with
/// the default feature set); the signature covers those exact bytes.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: String,
    signer: Arc<dyn Signer>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RequestBuilder {
    pub fn new(base_url: impl Into<String>, signer: Arc<dyn Signer>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full endpoint URL for a trade API method
    pub fn endpoint_url(&self, method: &str) -> String {
        format!("{}{}{}", self.base_url, TRADE_API_PATH, method)
    }

    /// Build a request stamped with the current time
    pub fn build(
        &self,
        method: &str,
        params: &Map<String, Value>,
    ) -> Result<SignedRequest, ExchangeError> {
        self.build_at(method, params, current_timestamp_millis())
    }

    /// Build a request stamped with `ts`
    #[instrument(skip(self, params), fields(exchange = "payeer", method = %method, ts = ts))]
    pub fn build_at(
        &self,
        method: &str,
        params: &Map<String, Value>,
        ts: i64,
    ) -> Result<SignedRequest, ExchangeError> {
        if method.trim().is_empty() {
            return Err(ExchangeError::InvalidParameters(
                "Method name cannot be empty".to_string(),
            ));
        }

        let mut payload = params.clone();
        payload.insert(TIMESTAMP_FIELD.to_string(), Value::from(ts));

        let body = serde_json::to_vec(&payload).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
        })?;

        let mut headers = self.signer.sign_request(method, &body)?;
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        debug!(body_len = body.len(), "Signed request");

        Ok(SignedRequest {
            method: method.to_string(),
            url: self.endpoint_url(method),
            body,
            headers,
            ts,
        })
    }
}

/// Wall-clock time in milliseconds, rounded to the nearest millisecond
pub fn current_timestamp_millis() -> i64 {
    let micros = chrono::Utc::now().timestamp_micros();
    (micros + 500).div_euclid(1000)
}
