//! Core types and structures for healthchat
//!
//! This crate provides the data model shared by the transport, the state
//! managers and both front-ends.

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Greeting used to seed a fresh conversation
pub const SEED_GREETING: &str = "Hello! I'm your AI Health Assistant. I can help answer general health questions, provide wellness information, and discuss symptoms. How can I assist you today?";

// ============================================================================
// Conversation Types
// ============================================================================

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in the chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// The greeting turn every conversation starts from
    pub fn seed() -> Self {
        Self::assistant(SEED_GREETING)
    }

    pub fn is_seed(&self) -> bool {
        self.role == Role::Assistant && self.content == SEED_GREETING
    }
}

// ============================================================================
// Chat Endpoint
// ============================================================================

/// Prior turn as sent to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&Turn> for HistoryEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.content.clone(),
        }
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// Build a request from the turns that precede `message`.
    /// System turns are never replayed to the backend.
    pub fn new(message: impl Into<String>, prior: &[Turn]) -> Self {
        Self {
            message: message.into(),
            conversation_history: prior
                .iter()
                .filter(|turn| turn.role != Role::System)
                .map(HistoryEntry::from)
                .collect(),
        }
    }
}

/// Successful reply from `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

// ============================================================================
// Symptom Check Endpoint
// ============================================================================

/// Body of `POST /api/symptom-check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCheckRequest {
    pub symptoms: Vec<String>,
}

/// Successful reply from `POST /api/symptom-check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "analysis")]
    pub analysis_text: String,
    #[serde(rename = "disclaimer")]
    pub disclaimer_text: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Body returned by either endpoint on a non-success status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
