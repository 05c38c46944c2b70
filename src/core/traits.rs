use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

#[async_trait]
pub trait MarketDataSource {
    /// Limits and available pairs, the whole response
    async fn info(&self, pair: Option<&str>) -> Result<Map<String, Value>, ExchangeError>;

    /// 24h price statistics keyed by pair
    async fn ticker(&self, pair: Option<&str>) -> Result<Value, ExchangeError>;

    /// Open orders (order book side) for one or more pairs
    async fn orders(&self, pair: &str) -> Result<Value, ExchangeError>;

    /// Recent trades for one or more pairs
    async fn trades(&self, pair: &str) -> Result<Value, ExchangeError>;

    /// Exchange time in milliseconds
    async fn server_time(&self) -> Result<i64, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    async fn limit_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError>;

    /// Exactly one of `amount` and `value` must be positive
    async fn market_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        value: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError>;

    async fn stop_limit_order(
        &self,
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Result<Map<String, Value>, ExchangeError>;

    async fn cancel_order(&self, order_id: u64) -> Result<bool, ExchangeError>;

    /// Cancel every order matching the optional filters
    async fn cancel_orders(
        &self,
        pair: Option<&str>,
        action: Option<&str>,
    ) -> Result<Value, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn account(&self) -> Result<Value, ExchangeError>;

    async fn order_status(&self, order_id: u64) -> Result<Value, ExchangeError>;

    async fn my_orders(
        &self,
        pair: Option<&str>,
        action: Option<&str>,
    ) -> Result<Value, ExchangeError>;
}

#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
