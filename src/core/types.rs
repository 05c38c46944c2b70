use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order direction, sent as `action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Parse an optional action filter, treating an empty string as absent
    pub fn parse_filter(action: Option<&str>) -> Result<Option<Self>, ExchangeError> {
        match action {
            None => Ok(None),
            Some(a) if a.is_empty() => Ok(None),
            Some(a) => a.parse().map(Some),
        }
    }
}

impl FromStr for OrderSide {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ExchangeError::InvalidParameters(format!(
                "Action may be only sell or buy, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type accepted by `order_create`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Limit,
    Market,
    StopLimit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::StopLimit => "stop_limit",
        })
    }
}

/// Reject zero and negative values of a named order field
pub fn ensure_positive(field: &str, value: Decimal) -> Result<Decimal, ExchangeError> {
    if value <= Decimal::ZERO {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} cannot be less or equal zero",
            field
        )));
    }
    Ok(value)
}
