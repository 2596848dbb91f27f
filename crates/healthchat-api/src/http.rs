use async_trait::async_trait;
use serde_json::Value;

use crate::logging::{log_failure, log_request, log_response};
use crate::transport::{interpret_response, ApiError, Endpoint, Transport};

/// reqwest-backed transport for native front-ends
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        // Ensure base_url doesn't end with a slash
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, endpoint: &Endpoint, body: Value) -> Result<Value, ApiError> {
        let url = endpoint.url(&self.base_url);
        log_request(&url, &body);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let err = ApiError::Network(e.to_string());
                log_failure(&url, &err);
                err
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log_response(&url, status, &text);

        interpret_response(endpoint, status, &text).inspect_err(|err| log_failure(&url, err))
    }
}
