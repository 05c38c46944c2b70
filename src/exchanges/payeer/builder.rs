use crate::core::config::{ConfigError, ExchangeConfig};
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HmacSigner, ReqwestRest, RequestBuilder, RestClient, RestClientBuilder, RestClientConfig,
};
use crate::exchanges::payeer::{connector::PayeerConnector, rest::PayeerRest};
use std::sync::Arc;

const EXCHANGE_NAME: &str = "payeer";

/// Builder for creating Payeer connectors
///
/// Every trade API method is signed, so credentials are mandatory.
pub struct PayeerBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    user_agent: Option<String>,
}

impl Default for PayeerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayeerBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::new(String::new(), String::new()),
            rest_timeout: 30,
            user_agent: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        if let Some(timeout) = config.timeout_seconds {
            self.rest_timeout = timeout;
        }
        self.config = config;
        self
    }

    /// Set API credentials, keeping any configured base URL
    pub fn with_credentials(mut self, api_id: String, secret_key: String) -> Self {
        let base_url = self.config.base_url.take();
        self.config = ExchangeConfig::new(api_id, secret_key);
        self.config.base_url = base_url;
        self
    }

    /// Set base URL for REST API
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    fn request_builder(&self) -> Result<RequestBuilder, ExchangeError> {
        if !self.config.has_credentials() {
            return Err(ExchangeError::ConfigError(ConfigError::InvalidConfiguration(
                "Payeer API id and secret key are required".to_string(),
            )));
        }

        let signer = Arc::new(HmacSigner::new(
            self.config.api_id().to_string(),
            self.config.secret_key().to_string(),
        ));
        Ok(RequestBuilder::new(self.config.resolved_base_url(), signer))
    }

    /// Build a connector on the reqwest transport
    pub fn build(self) -> Result<PayeerConnector<ReqwestRest>, ExchangeError> {
        let request_builder = self.request_builder()?;

        let mut rest_config = RestClientConfig::new(
            request_builder.base_url().to_string(),
            EXCHANGE_NAME.to_string(),
        )
        .with_timeout(self.rest_timeout);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let rest = RestClientBuilder::new(rest_config).build()?;
        Ok(PayeerConnector::new(PayeerRest::new(rest, request_builder)))
    }

    /// Build a connector on a caller-supplied transport
    pub fn build_with_transport<R: RestClient + Clone>(
        self,
        transport: R,
    ) -> Result<PayeerConnector<R>, ExchangeError> {
        let request_builder = self.request_builder()?;
        Ok(PayeerConnector::new(PayeerRest::new(transport, request_builder)))
    }
}

/// Create a Payeer connector from a configuration
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<PayeerConnector<ReqwestRest>, ExchangeError> {
    PayeerBuilder::new().with_config(config).build()
}
