use crate::core::errors::{ErrorDetail, ExchangeError};
use crate::core::kernel::{RequestBuilder, RestClient, SignedRequest};
use crate::exchanges::payeer::types::{to_params, ApiResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{instrument, warn};

/// Payeer trade API dispatcher
///
/// Signs each call, sends it once through the transport and decodes the
/// response envelope. The most recent API error detail is also kept for
/// inspection; clones share that slot.
#[derive(Debug, Clone)]
pub struct PayeerRest<R: RestClient> {
    rest_client: R,
    request_builder: RequestBuilder,
    last_error: Arc<Mutex<Option<ErrorDetail>>>,
}

impl<R: RestClient> PayeerRest<R> {
    pub fn new(rest_client: R, request_builder: RequestBuilder) -> Self {
        Self {
            rest_client,
            request_builder,
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn request_builder(&self) -> &RequestBuilder {
        &self.request_builder
    }

    /// Detail of the last failed API call, if any
    pub fn last_error(&self) -> Option<ErrorDetail> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_last_error(&self) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn record_error(&self, detail: &ErrorDetail) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(detail.clone());
    }

    /// Send a prepared request and decode the envelope
    #[instrument(skip(self, request), fields(exchange = "payeer", method = %request.method))]
    pub async fn send(&self, request: &SignedRequest) -> Result<ApiResponse, ExchangeError> {
        let response_value = self.rest_client.post_signed(request).await?;
        ApiResponse::from_value(response_value)
    }

    /// Sign, send and unwrap one trade API call
    ///
    /// Returns the whole success payload unchanged. On `success != true` the
    /// error detail is recorded as the last error and returned as
    /// [`ExchangeError::Api`].
    #[instrument(skip(self, params), fields(exchange = "payeer", method = %method))]
    pub async fn call(
        &self,
        method: &str,
        params: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ExchangeError> {
        let request = self.request_builder.build(method, params)?;
        let response = self.send(&request).await?;
        self.handle_response(method, response)
    }

    /// Like [`call`](Self::call) with a typed request body
    pub async fn call_with<P: Serialize + Sync>(
        &self,
        method: &str,
        request: &P,
    ) -> Result<Map<String, Value>, ExchangeError> {
        let params = to_params(request)?;
        self.call(method, &params).await
    }

    /// Like [`call_with`](Self::call_with), decoding the payload into `T`
    pub async fn call_json<P, T>(&self, method: &str, request: &P) -> Result<T, ExchangeError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let payload = self.call_with(method, request).await?;
        serde_json::from_value(Value::Object(payload)).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Failed to decode '{}' response: {}",
                method, e
            ))
        })
    }

    fn handle_response(
        &self,
        method: &str,
        response: ApiResponse,
    ) -> Result<Map<String, Value>, ExchangeError> {
        response.into_result().map_err(|detail| {
            warn!(method, code = %detail.code, "Payeer API call failed");
            self.record_error(&detail);
            ExchangeError::Api(detail)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use crate::core::kernel::{API_SIGN_HEADER, TIMESTAMP_FIELD};
    use crate::exchanges::payeer::test_support::{mock_payeer_rest, MockRest};
    use serde::Deserialize;
    use serde_json::json;

    #[tokio::test]
    async fn test_call_returns_payload_unchanged() {
        let mock = MockRest::replying(json!({"success": true, "pairs": {"BTC_USDT": 12}}));
        let rest = mock_payeer_rest(&mock);

        let payload = rest.call("ticker", &Map::new()).await.unwrap();

        assert_eq!(
            Value::Object(payload),
            json!({"success": true, "pairs": {"BTC_USDT": 12}})
        );
        assert!(rest.last_error().is_none());
    }

    #[tokio::test]
    async fn test_call_records_last_error() {
        let mock = MockRest::replying(json!({"success": false, "error": {"code": "INVALID_SIGN"}}));
        let rest = mock_payeer_rest(&mock);

        let err = rest.call("account", &Map::new()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.api_detail().unwrap().code, "INVALID_SIGN");
        assert_eq!(rest.last_error().unwrap().code, "INVALID_SIGN");

        rest.clear_last_error();
        assert!(rest.last_error().is_none());
    }

    #[tokio::test]
    async fn test_last_error_is_overwritten_and_shared_by_clones() {
        let mock = MockRest::sequence(vec![
            json!({"success": false, "error": {"code": "INVALID_SIGN"}}),
            json!({"success": true, "time": 1}),
            json!({"success": false, "error": {"code": "INVALID_TIMESTAMP"}}),
        ]);
        let rest = mock_payeer_rest(&mock);
        let clone = rest.clone();

        rest.call("time", &Map::new()).await.unwrap_err();
        rest.call("time", &Map::new()).await.unwrap();
        assert_eq!(clone.last_error().unwrap().code, "INVALID_SIGN");

        clone.call("time", &Map::new()).await.unwrap_err();
        assert_eq!(rest.last_error().unwrap().code, "INVALID_TIMESTAMP");
    }

    #[tokio::test]
    async fn test_transport_errors_do_not_touch_last_error() {
        let mock = MockRest::network_error("connection refused");
        let rest = mock_payeer_rest(&mock);

        let err = rest.call("info", &Map::new()).await.unwrap_err();
        assert!(err.is_transport());
        assert!(rest.last_error().is_none());

        let mock = MockRest::replying(json!("<html>busy</html>"));
        let rest = mock_payeer_rest(&mock);
        let err = rest.call("info", &Map::new()).await.unwrap_err();
        assert!(err.is_transport());
        assert!(rest.last_error().is_none());
    }

    #[tokio::test]
    async fn test_call_sends_one_signed_request() {
        let mock = MockRest::replying(json!({"success": true}));
        let rest = mock_payeer_rest(&mock);

        let mut params = Map::new();
        params.insert("pair".to_string(), json!("BTC_USDT"));
        rest.call("orders", &params).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "https://payeer.test/api/trade/orders");
        assert!(request.header(API_SIGN_HEADER).is_some());

        let body = request.body_json().unwrap();
        assert_eq!(body.get("pair"), Some(&json!("BTC_USDT")));
        assert!(body.get(TIMESTAMP_FIELD).and_then(Value::as_i64).is_some());
    }

    #[tokio::test]
    async fn test_send_does_not_record_error() {
        let mock = MockRest::replying(json!({"success": false, "error": {"code": "BAD"}}));
        let rest = mock_payeer_rest(&mock);
        let request = rest.request_builder().build("time", &Map::new()).unwrap();

        let response = rest.send(&request).await.unwrap();
        assert!(!response.success);
        assert!(rest.last_error().is_none());
    }

    #[tokio::test]
    async fn test_call_json_decodes_payload() {
        #[derive(Deserialize)]
        struct TimeResponse {
            time: i64,
        }

        let mock = MockRest::replying(json!({"success": true, "time": 1_700_000_000_000_i64}));
        let rest = mock_payeer_rest(&mock);

        let response: TimeResponse = rest.call_json("time", &Map::new()).await.unwrap();
        assert_eq!(response.time, 1_700_000_000_000);
    }
}
