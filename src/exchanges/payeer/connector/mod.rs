use crate::core::errors::{ErrorDetail, ExchangeError};
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::exchanges::payeer::rest::PayeerRest;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Payeer connector that composes all sub-trait implementations
///
/// All components share one dispatcher, so [`last_error`](Self::last_error)
/// reflects failures from any of them.
pub struct PayeerConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
    rest: PayeerRest<R>,
}

impl<R: RestClient + Clone> PayeerConnector<R> {
    pub fn new(rest: PayeerRest<R>) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
            rest,
        }
    }
}

impl<R: RestClient> PayeerConnector<R> {
    /// Underlying dispatcher, for methods without a dedicated wrapper
    pub fn rest(&self) -> &PayeerRest<R> {
        &self.rest
    }

    /// Detail of the most recent API failure
    pub fn last_error(&self) -> Option<ErrorDetail> {
        self.rest.last_error()
    }

    /// Raw signed call returning the whole success payload
    pub async fn call(
        &self,
        method: &str,
        params: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ExchangeError> {
        self.rest.call(method, params).await
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for PayeerConnector<R> {
    async fn info(&self, pair: Option<&str>) -> Result<Map<String, Value>, ExchangeError> {
        self.market.info(pair).await
    }

    async fn ticker(&self, pair: Option<&str>) -> Result<Value, ExchangeError> {
        self.market.ticker(pair).await
    }

    async fn orders(&self, pair: &str) -> Result<Value, ExchangeError> {
        self.market.orders(pair).await
    }

    async fn trades(&self, pair: &str) -> Result<Value, ExchangeError> {
        self.market.trades(pair).await
    }

    async fn server_time(&self) -> Result<i64, ExchangeError> {
        self.market.server_time().await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for PayeerConnector<R> {
    async fn limit_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError> {
        self.trading.limit_order(pair, action, amount, price).await
    }

    async fn market_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        value: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError> {
        self.trading.market_order(pair, action, amount, value).await
    }

    async fn stop_limit_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError> {
        self.trading
            .stop_limit_order(pair, action, amount, price, stop_price)
            .await
    }

    async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError> {
        self.trading.cancel_order(order_id).await
    }

    async fn cancel_orders(
        &self,
        pair: Option<&str>,
        action: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.trading.cancel_orders(pair, action).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for PayeerConnector<R> {
    async fn account(&self) -> Result<Value, ExchangeError> {
        self.account.account().await
    }

    async fn order_status(&self, order_id: u64) -> Result<Value, ExchangeError> {
        self.account.order_status(order_id).await
    }

    async fn my_orders(
        &self,
        pair: Option<&str>,
        action: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.account.my_orders(pair, action).await
    }
}

impl<R: RestClient> ExchangeConnector for PayeerConnector<R> {}
