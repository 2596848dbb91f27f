use async_trait::async_trait;
use gloo_net::http::Request;
use healthchat_api::logging::{log_failure, log_request, log_response};
use healthchat_api::{interpret_response, ApiError, Endpoint, Transport};
use serde_json::Value;

/// Browser `fetch` transport
#[derive(Debug, Clone)]
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_json(&self, endpoint: &Endpoint, body: Value) -> Result<Value, ApiError> {
        let url = endpoint.url(&self.base_url);
        log_request(&url, &body);

        // `json` sets the Content-Type header
        let request = Request::post(&url)
            .json(&body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = request.send().await.map_err(|e| {
            let err = ApiError::Network(e.to_string());
            log_failure(&url, &err);
            err
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        log_response(&url, status, &text);

        interpret_response(endpoint, status, &text).inspect_err(|err| log_failure(&url, err))
    }
}
