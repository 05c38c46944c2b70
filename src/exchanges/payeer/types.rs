use crate::core::errors::{ErrorDetail, ExchangeError};
use crate::core::types::{ensure_positive, OrderSide, OrderType};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// Trade API method names
pub mod method {
    pub const INFO: &str = "info";
    pub const TICKER: &str = "ticker";
    pub const ORDERS: &str = "orders";
    pub const TRADES: &str = "trades";
    pub const ACCOUNT: &str = "account";
    pub const ORDER_CREATE: &str = "order_create";
    pub const ORDER_STATUS: &str = "order_status";
    pub const ORDER_CANCEL: &str = "order_cancel";
    pub const ORDERS_CANCEL: &str = "orders_cancel";
    pub const MY_ORDERS: &str = "my_orders";
    pub const TIME: &str = "time";
}

/// Decoded response envelope
///
/// `payload` holds the whole response object and is present iff `success`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub payload: Option<Map<String, Value>>,
    pub error: Option<ErrorDetail>,
}

impl ApiResponse {
    /// Decode the `{"success": ..., "error": {...}}` envelope
    ///
    /// Anything but the boolean `true` in `success` is a failure. A failure
    /// without a readable `error` object does not match the envelope and is
    /// reported as a deserialization error.
    pub fn from_value(value: Value) -> Result<Self, ExchangeError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ExchangeError::DeserializationError(format!(
                    "Expected a JSON object response, got: {}",
                    other
                )))
            }
        };

        if object.get("success") == Some(&Value::Bool(true)) {
            return Ok(Self {
                success: true,
                payload: Some(object),
                error: None,
            });
        }

        let error = object
            .get("error")
            .cloned()
            .and_then(|raw| serde_json::from_value::<ErrorDetail>(raw).ok())
            .ok_or_else(|| {
                ExchangeError::DeserializationError(format!(
                    "Failed response without a valid error object: {}",
                    Value::Object(object.clone())
                ))
            })?;

        Ok(Self {
            success: false,
            payload: None,
            error: Some(error),
        })
    }

    /// Payload on success, error detail otherwise
    pub fn into_result(self) -> Result<Map<String, Value>, ErrorDetail> {
        match (self.success, self.payload, self.error) {
            (true, Some(payload), _) => Ok(payload),
            (_, _, Some(error)) => Err(error),
            (_, _, None) => Err(ErrorDetail::new("UNKNOWN_ERROR")),
        }
    }
}

/// Serialize a typed request into the params map sent on the wire
pub fn to_params<T: Serialize>(request: &T) -> Result<Map<String, Value>, ExchangeError> {
    match serde_json::to_value(request) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ExchangeError::SerializationError(format!(
            "Request must serialize to a JSON object, got: {}",
            other
        ))),
        Err(e) => Err(ExchangeError::SerializationError(e.to_string())),
    }
}

/// Take one field out of a success payload
pub fn extract_field(mut payload: Map<String, Value>, field: &str) -> Result<Value, ExchangeError> {
    payload.remove(field).ok_or_else(|| {
        ExchangeError::DeserializationError(format!("Missing field '{}' in response", field))
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn required_pair(pair: &str) -> Result<String, ExchangeError> {
    if pair.trim().is_empty() {
        return Err(ExchangeError::InvalidParameters(
            "Pair cannot be empty".to_string(),
        ));
    }
    Ok(pair.to_string())
}

/// Optional pair filter for `info` and `ticker`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}

impl PairFilter {
    pub fn new(pair: Option<&str>) -> Self {
        Self {
            pair: non_empty(pair),
        }
    }
}

/// Mandatory pair list for `orders` and `trades`, e.g. `BTC_USDT,TRX_USDT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRequest {
    pub pair: String,
}

impl PairRequest {
    pub fn new(pair: &str) -> Result<Self, ExchangeError> {
        Ok(Self {
            pair: required_pair(pair)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderIdRequest {
    pub order_id: u64,
}

/// Optional pair and side filters for `orders_cancel` and `my_orders`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<OrderSide>,
}

impl OrderFilter {
    pub fn new(pair: Option<&str>, action: Option<&str>) -> Result<Self, ExchangeError> {
        Ok(Self {
            pair: non_empty(pair),
            action: OrderSide::parse_filter(action)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitOrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub pair: String,
    pub action: OrderSide,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LimitOrderRequest {
    pub fn new(
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Self, ExchangeError> {
        let action = action.parse()?;
        Ok(Self {
            order_type: OrderType::Limit,
            pair: required_pair(pair)?,
            action,
            amount: ensure_positive("Amount", amount)?,
            price: ensure_positive("Price", price)?,
        })
    }
}

/// Market order sized either by base `amount` or by quote `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketOrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub pair: String,
    pub action: OrderSide,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
}

impl MarketOrderRequest {
    /// Only the positive one of `amount` and `value` is sent
    pub fn new(
        pair: &str,
        action: &str,
        amount: Decimal,
        value: Decimal,
    ) -> Result<Self, ExchangeError> {
        let action = action.parse()?;

        let has_amount = amount > Decimal::ZERO;
        let has_value = value > Decimal::ZERO;
        if !has_amount && !has_value {
            return Err(ExchangeError::InvalidParameters(
                "amount and value cannot both be zero or negative".to_string(),
            ));
        }
        if has_amount && has_value {
            return Err(ExchangeError::InvalidParameters(
                "use only one of amount or value, the other must be zero".to_string(),
            ));
        }

        Ok(Self {
            order_type: OrderType::Market,
            pair: required_pair(pair)?,
            action,
            amount: has_amount.then_some(amount),
            value: has_value.then_some(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopLimitOrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub pair: String,
    pub action: OrderSide,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_price: Decimal,
}

impl StopLimitOrderRequest {
    pub fn new(
        pair: &str,
        action: &str,
        amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Result<Self, ExchangeError> {
        let action = action.parse()?;
        Ok(Self {
            order_type: OrderType::StopLimit,
            pair: required_pair(pair)?,
            action,
            amount: ensure_positive("Amount", amount)?,
            price: ensure_positive("Price", price)?,
            stop_price: ensure_positive("Stop price", stop_price)?,
        })
    }
}
