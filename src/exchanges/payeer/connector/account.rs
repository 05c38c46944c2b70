use crate::core::{errors::ExchangeError, kernel::RestClient, traits::AccountInfo};
use crate::exchanges::payeer::rest::PayeerRest;
use crate::exchanges::payeer::types::{extract_field, method, OrderFilter, OrderIdRequest};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::instrument;

/// Account implementation for Payeer
pub struct Account<R: RestClient> {
    rest: PayeerRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &PayeerRest<R>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn account(&self) -> Result<Value, ExchangeError> {
        let payload = self.rest.call(method::ACCOUNT, &Map::new()).await?;
        extract_field(payload, "balances")
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn order_status(&self, order_id: u64) -> Result<Value, ExchangeError> {
        let payload = self
            .rest
            .call_with(method::ORDER_STATUS, &OrderIdRequest { order_id })
            .await?;
        extract_field(payload, "order")
    }

    #[instrument(skip(self), fields(exchange = "payeer"))]
    async fn my_orders(
        &self,
        pair: Option<&str>,
        action: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let filter = OrderFilter::new(pair, action)?;
        let payload = self.rest.call_with(method::MY_ORDERS, &filter).await?;
        extract_field(payload, "items")
    }
}
