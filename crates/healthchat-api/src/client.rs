use healthchat_types::{AnalysisResult, ChatRequest, ChatResponse, SymptomCheckRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::transport::{ApiError, Endpoint, Transport};

/// Typed access to the two backend endpoints
#[derive(Debug, Clone)]
pub struct HealthClient<T> {
    transport: T,
}

impl<T: Transport> HealthClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one chat message together with the conversation so far
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.call(&Endpoint::CHAT, request).await
    }

    /// Ask the backend to analyse a list of symptoms
    pub async fn check_symptoms(&self, request: &SymptomCheckRequest) -> Result<AnalysisResult, ApiError> {
        self.call(&Endpoint::SYMPTOM_CHECK, request).await
    }

    async fn call<B, R>(&self, endpoint: &Endpoint, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let value = self.transport.post_json(endpoint, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
