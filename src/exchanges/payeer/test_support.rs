use crate::core::errors::ExchangeError;
use crate::core::kernel::{HmacSigner, RequestBuilder, RestClient, SignedRequest};
use crate::exchanges::payeer::rest::PayeerRest;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const TEST_API_ID: &str = "test-api-id";
pub const TEST_SECRET: &str = "test_secret";
pub const TEST_BASE_URL: &str = "https://payeer.test";

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    NetworkError(String),
}

/// Transport spy: records every request and answers from a script
///
/// The last scripted reply repeats once the script runs out.
#[derive(Debug, Clone)]
pub struct MockRest {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<SignedRequest>>>,
}

impl MockRest {
    fn with_replies(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(value: Value) -> Self {
        Self::with_replies(vec![Reply::Json(value)])
    }

    pub fn sequence(values: Vec<Value>) -> Self {
        Self::with_replies(values.into_iter().map(Reply::Json).collect())
    }

    pub fn network_error(message: &str) -> Self {
        Self::with_replies(vec![Reply::NetworkError(message.to_string())])
    }

    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn post_signed(&self, request: &SignedRequest) -> Result<Value, ExchangeError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::NetworkError(message)) => Err(ExchangeError::NetworkError(message)),
            None => Err(ExchangeError::NetworkError("no scripted reply".to_string())),
        }
    }
}

pub fn test_request_builder() -> RequestBuilder {
    RequestBuilder::new(
        TEST_BASE_URL,
        Arc::new(HmacSigner::new(
            TEST_API_ID.to_string(),
            TEST_SECRET.to_string(),
        )),
    )
}

pub fn mock_payeer_rest(mock: &MockRest) -> PayeerRest<MockRest> {
    PayeerRest::new(mock.clone(), test_request_builder())
}
