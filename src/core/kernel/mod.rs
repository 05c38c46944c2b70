/// Payeer kernel - signing and transport layer
///
/// The kernel turns a trade API method name plus a params map into a signed
/// HTTP request and moves it over the wire. It knows nothing about the
/// exchange's response envelope or individual endpoints.
///
/// # Components
///
/// - `RequestBuilder`: injects the `ts` field, serializes the body and asks a
///   `Signer` for authentication headers
/// - `Signer` / `HmacSigner`: HMAC-SHA256 over `method || body`, hex encoded
/// - `RestClient` / `ReqwestRest`: single-shot POST transport
///
/// # Usage
/// ```rust,no_run
/// use payeer_trade::core::kernel::*;
/// use serde_json::Map;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = Arc::new(HmacSigner::new("api_id".to_string(), "secret".to_string()));
/// let builder = RequestBuilder::new("https://payeer.com", signer);
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     "https://payeer.com".to_string(),
///     "payeer".to_string(),
/// ))
/// .build()?;
///
/// let request = builder.build("time", &Map::new())?;
/// let body = rest.post_signed(&request).await?;
/// println!("{}", body);
/// # Ok(())
/// # }
/// ```
pub mod request;
pub mod rest;
pub mod signer;

pub use request::{current_timestamp_millis, RequestBuilder, SignedRequest, TIMESTAMP_FIELD};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{sign_payload, HmacSigner, SignatureResult, Signer, API_ID_HEADER, API_SIGN_HEADER};
