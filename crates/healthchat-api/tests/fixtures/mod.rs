use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock backend for exercising the HTTP transport
pub struct HealthMockServer {
    server: MockServer,
}

impl HealthMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mock a successful chat reply for a specific message
    pub async fn mock_chat_success(&self, request_message: &str, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({ "message": request_message })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": reply })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a successful symptom analysis
    pub async fn mock_symptom_check_success(&self, symptoms: &[&str], analysis: &str, disclaimer: &str) {
        Mock::given(method("POST"))
            .and(path("/api/symptom-check"))
            .and(body_json(json!({ "symptoms": symptoms })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "analysis": analysis,
                "disclaimer": disclaimer
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a non-success status with a raw body on any endpoint
    pub async fn mock_failure(&self, endpoint_path: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}
