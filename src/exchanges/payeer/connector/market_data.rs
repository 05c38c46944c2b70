use crate::core::{errors::ExchangeError, kernel::RestClient, traits::MarketDataSource};
use crate::exchanges::payeer::rest::PayeerRest;
use crate::exchanges::payeer::types::{extract_field, method, PairFilter, PairRequest};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::instrument;

/// Market data endpoints for Payeer
pub struct MarketData<R: RestClient> {
    rest: PayeerRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &PayeerRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn info(&self, pair: Option<&str>) -> Result<Map<String, Value>, ExchangeError> {
        self.rest.call_with(method::INFO, &PairFilter::new(pair)).await
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn ticker(&self, pair: Option<&str>) -> Result<Value, ExchangeError> {
        let payload = self
            .rest
            .call_with(method::TICKER, &PairFilter::new(pair))
            .await?;
        extract_field(payload, "pairs")
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn orders(&self, pair: &str) -> Result<Value, ExchangeError> {
        let request = PairRequest::new(pair)?;
        let payload = self.rest.call_with(method::ORDERS, &request).await?;
        extract_field(payload, "pairs")
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn trades(&self, pair: &str) -> Result<Value, ExchangeError> {
        let request = PairRequest::new(pair)?;
        let payload = self.rest.call_with(method::TRADES, &request).await?;
        extract_field(payload, "pairs")
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn server_time(&self) -> Result<i64, ExchangeError> {
        let payload = self.rest.call(method::TIME, &Map::new()).await?;
        let time = extract_field(payload, "time")?;
        time.as_i64().ok_or_else(|| {
            ExchangeError::DeserializationError(format!("Invalid time in response: {}", time))
        })
    }
}
