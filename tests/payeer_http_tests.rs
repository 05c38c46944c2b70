use httpmock::{Method::POST, MockServer};
use payeer_trade::core::kernel::{
    sign_payload, HmacSigner, ReqwestRest, RequestBuilder, RestClient, RestClientBuilder,
    RestClientConfig, API_ID_HEADER, API_SIGN_HEADER,
};
use payeer_trade::{
    AccountInfo, ErrorKind, ExchangeConfig, MarketDataSource, OrderPlacer, PayeerBuilder,
    PayeerConnector,
};
use rust_decimal_macros::dec;
use serde_json::{json, Map};
use std::sync::Arc;

const API_ID: &str = "integration-id";
const SECRET: &str = "integration-secret";

fn connector(server: &MockServer) -> PayeerConnector<ReqwestRest> {
    PayeerBuilder::new()
        .with_config(ExchangeConfig::new(API_ID.to_string(), SECRET.to_string()))
        .with_base_url(server.base_url())
        .with_rest_timeout(5)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_time_request_is_signed_post() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/trade/time")
            .header("Content-Type", "application/json")
            .header(API_ID_HEADER, API_ID)
            .header_exists(API_SIGN_HEADER);
        then.status(200)
            .json_body(json!({"success": true, "time": 1_700_000_000_000_i64}));
    });

    let time = connector(&server).server_time().await.unwrap();

    mock.assert();
    assert_eq!(time, 1_700_000_000_000);
}

#[tokio::test]
async fn test_prebuilt_request_signature_reaches_server() {
    let server = MockServer::start();
    let builder = RequestBuilder::new(
        server.base_url(),
        Arc::new(HmacSigner::new(API_ID.to_string(), SECRET.to_string())),
    );
    let request = builder.build_at("time", &Map::new(), 1_700_000_000_000).unwrap();
    let expected = sign_payload(SECRET, "time", br#"{"ts":1700000000000}"#).unwrap();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/trade/time")
            .header(API_SIGN_HEADER, expected.as_str())
            .body(r#"{"ts":1700000000000}"#);
        then.status(200).json_body(json!({"success": true, "time": 1}));
    });

    let rest = RestClientBuilder::new(RestClientConfig::new(
        server.base_url(),
        "payeer".to_string(),
    ))
    .build()
    .unwrap();
    let body = rest.post_signed(&request).await.unwrap();

    mock.assert();
    assert_eq!(body, json!({"success": true, "time": 1}));
}

#[tokio::test]
async fn test_api_error_is_reported_and_retained() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/trade/account");
        then.status(200)
            .json_body(json!({"success": false, "error": {"code": "INVALID_SIGN"}}));
    });
    let connector = connector(&server);

    let err = connector.account().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.api_detail().unwrap().code, "INVALID_SIGN");
    assert_eq!(connector.last_error().unwrap().code, "INVALID_SIGN");
}

#[tokio::test]
async fn test_error_envelope_with_error_status_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/trade/order_status");
        then.status(400).json_body(json!({
            "success": false,
            "error": {"code": "INVALID_PARAMETER", "parameter": "order_id"}
        }));
    });

    let err = connector(&server).order_status(1).await.unwrap_err();

    let detail = err.api_detail().unwrap();
    assert_eq!(detail.code, "INVALID_PARAMETER");
    assert_eq!(detail.extra.get("parameter"), Some(&json!("order_id")));
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/trade/ticker");
        then.status(200).body("not json");
    });
    let connector = connector(&server);

    let err = connector.ticker(None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(connector.last_error().is_none());
}

#[tokio::test]
async fn test_gateway_error_page_is_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/trade/info");
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let err = connector(&server).info(None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let connector = PayeerBuilder::new()
        .with_credentials(API_ID.to_string(), SECRET.to_string())
        .with_base_url("http://127.0.0.1:9".to_string())
        .with_rest_timeout(2)
        .build()
        .unwrap();

    let err = connector.server_time().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_validation_error_sends_nothing() {
    // No mock registered: any request reaching the server would come back as a 404
    let server = MockServer::start();

    let err = connector(&server)
        .limit_order("BTC_USDT", "hold", dec!(1), dec!(1))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}
