use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Error detail returned by the exchange inside a failed response envelope
///
/// Payeer reports failures as `{"success": false, "error": {"code": "..."}}`.
/// Fields other than `code` and `description` (for example `parameter`)
/// are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} ({})", self.code, description),
            None => write!(f, "{}", self.code),
        }
    }
}

/// Failure class of an [`ExchangeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected locally before anything was sent
    Validation,
    /// The exchange answered with `success != true`
    Api,
    /// The exchange could not be reached or its answer could not be decoded
    Transport,
    /// The client itself is misconfigured
    Configuration,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("API error: {0}")]
    Api(ErrorDetail),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameters(_) | Self::SerializationError(_) => ErrorKind::Validation,
            Self::Api(_) => ErrorKind::Api,
            Self::NetworkError(_) | Self::HttpStatus { .. } | Self::DeserializationError(_) => {
                ErrorKind::Transport
            }
            Self::AuthError(_) | Self::ConfigError(_) => ErrorKind::Configuration,
        }
    }

    /// The exchange error detail, if this is an API error
    pub const fn api_detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Api(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_api(&self) -> bool {
        self.kind() == ErrorKind::Api
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::DeserializationError(err.to_string())
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}
