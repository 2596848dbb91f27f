use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use healthchat_api::{ApiError, Endpoint, HealthClient, Transport};
use serde_json::Value;

/// A request the fake transport received
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: &'static str,
    pub body: Value,
}

/// Scripted transport: replies are consumed in order and every call is
/// recorded. Clones share the script and the log.
#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Arc<Mutex<VecDeque<Result<Value, ApiError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, value: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail(self, err: ApiError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client(&self) -> HealthClient<FakeTransport> {
        HealthClient::new(self.clone())
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post_json(&self, endpoint: &Endpoint, body: Value) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: endpoint.path,
            body,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())))
    }
}

/// Server-side failure with the message the backend would send
pub fn server_error(message: &str) -> ApiError {
    ApiError::Server {
        status: 500,
        message: message.to_string(),
    }
}
