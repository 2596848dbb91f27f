use async_trait::async_trait;
use healthchat_types::ErrorBody;
use serde_json::Value;
use thiserror::Error;

/// A backend route together with the message used when the server fails
/// without explaining why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub failure_message: &'static str,
}

impl Endpoint {
    pub const CHAT: Endpoint = Endpoint {
        path: "/api/chat",
        failure_message: "Failed to get response",
    };

    pub const SYMPTOM_CHECK: Endpoint = Endpoint {
        path: "/api/symptom-check",
        failure_message: "Failed to analyze symptoms",
    };

    /// Join this endpoint onto an already normalized base URL
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Errors produced while talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{0}")]
    Network(String),

    /// Non-success status; `message` is the server's `error` field or the
    /// endpoint's generic failure message
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response whose body was not the expected JSON
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Minimal HTTP JSON capability used by both state managers.
///
/// Futures are `Send` on native targets so the client can live inside a
/// multi-threaded runtime; browser futures are not.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport {
    /// POST `body` as JSON to `endpoint` and return the parsed JSON reply
    async fn post_json(&self, endpoint: &Endpoint, body: Value) -> Result<Value, ApiError>;
}

/// Decide the outcome of a completed HTTP exchange.
///
/// Every transport funnels its raw status and body through here so that the
/// failure messages users see do not depend on which HTTP stack ran.
pub fn interpret_response(endpoint: &Endpoint, status: u16, body: &str) -> Result<Value, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| endpoint.failure_message.to_string());

    Err(ApiError::Server { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_endpoint_url_joins_without_double_slash() {
        assert_eq!(
            Endpoint::CHAT.url("http://localhost:5000/"),
            "http://localhost:5000/api/chat"
        );
        assert_eq!(
            Endpoint::SYMPTOM_CHECK.url("https://health.example"),
            "https://health.example/api/symptom-check"
        );
    }

    #[test]
    fn test_success_returns_parsed_body() {
        let value = interpret_response(&Endpoint::CHAT, 200, r#"{"message":"hi there"}"#).unwrap();
        assert_eq!(value, json!({"message": "hi there"}));
    }

    #[test]
    fn test_success_with_invalid_json_is_decode_error() {
        let err = interpret_response(&Endpoint::CHAT, 200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_server_error_uses_error_field() {
        let err = interpret_response(&Endpoint::CHAT, 500, r#"{"error":"Model overloaded"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "Model overloaded".to_string()
            }
        );
        assert_eq!(err.to_string(), "Model overloaded");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_server_error_without_field_uses_endpoint_message() {
        let err = interpret_response(&Endpoint::CHAT, 502, "{}").unwrap_err();
        assert_eq!(err.to_string(), "Failed to get response");

        let err = interpret_response(&Endpoint::SYMPTOM_CHECK, 400, "not json").unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze symptoms");

        let err = interpret_response(&Endpoint::SYMPTOM_CHECK, 400, r#"{"error":"  "}"#).unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze symptoms");
    }
}
