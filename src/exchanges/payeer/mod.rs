pub mod builder;
pub mod connector;
pub mod rest;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{build_connector, PayeerBuilder};
pub use connector::{Account, MarketData, PayeerConnector, Trading};
pub use rest::PayeerRest;
pub use types::{
    method, ApiResponse, LimitOrderRequest, MarketOrderRequest, OrderFilter, OrderIdRequest,
    PairFilter, PairRequest, StopLimitOrderRequest,
};
