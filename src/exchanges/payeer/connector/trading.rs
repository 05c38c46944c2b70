use crate::core::{errors::ExchangeError, kernel::RestClient, traits::OrderPlacer};
use crate::exchanges::payeer::rest::PayeerRest;
use crate::exchanges::payeer::types::{
    extract_field, method, LimitOrderRequest, MarketOrderRequest, OrderFilter, OrderIdRequest,
    StopLimitOrderRequest,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::instrument;

/// Order placement and cancellation for Payeer
///
/// Arguments are validated before anything is signed or sent.
pub struct Trading<R: RestClient> {
    rest: PayeerRest<R>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &PayeerRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn limit_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError> {
        let request = LimitOrderRequest::new(pair, action, amount, price)?;
        self.rest.call_with(method::ORDER_CREATE, &request).await
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn market_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        value: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError> {
        let request = MarketOrderRequest::new(pair, action, amount, value)?;
        self.rest.call_with(method::ORDER_CREATE, &request).await
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn stop_limit_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError> {
        let request = StopLimitOrderRequest::new(pair, action, amount, price, stop_price)?;
        self.rest.call_with(method::ORDER_CREATE, &request).await
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError> {
        let payload = self
            .rest
            .call_with(method::ORDER_CANCEL, &OrderIdRequest { order_id })
            .await?;
        let success = extract_field(payload, "success")?;
        success.as_bool().ok_or_else(|| {
            ExchangeError::DeserializationError(format!("Invalid success flag: {}", success))
        })
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn cancel_orders(
        &self,
        pair: Option<&str>,
        action: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let filter = OrderFilter::new(pair, action)?;
        let payload = self.rest.call_with(method::ORDERS_CANCEL, &filter).await?;
        extract_field(payload, "items")
    }
}
