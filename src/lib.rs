pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig,
    errors::{ErrorDetail, ErrorKind, ExchangeError},
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer},
};
pub use crate::exchanges::payeer::{build_connector, PayeerBuilder, PayeerConnector};
