use healthchat_api::{ApiError, HealthClient, Transport};
use healthchat_types::{ChatRequest, ChatResponse, Turn};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Question asked before the history is wiped
pub const CLEAR_HISTORY_PROMPT: &str =
    "Are you sure you want to clear all chat history? This cannot be undone.";

const SEND_FAILURE_FALLBACK: &str = "Failed to send message. Please try again.";

/// A chat request that has been committed locally and awaits the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub request: ChatRequest,
}

/// What happened to a `send_message` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or a request already in flight; nothing changed
    Ignored,
    /// The assistant's reply was appended
    Replied,
    /// The request failed; the user turn stays and `last_error` is set
    Failed(String),
}

/// Ordered chat history with persistence and a single in-flight request
pub struct ConversationStore<T, S> {
    client: HealthClient<T>,
    storage: S,
    storage_key: String,
    turns: Vec<Turn>,
    pending: bool,
    last_error: Option<String>,
}

impl<T: Transport, S: KeyValueStore> ConversationStore<T, S> {
    /// Create an uninitialized store; call [`initialize`](Self::initialize)
    /// before use, or use [`open`](Self::open)
    pub fn new(client: HealthClient<T>, storage: S, storage_key: impl Into<String>) -> Self {
        Self {
            client,
            storage,
            storage_key: storage_key.into(),
            turns: Vec::new(),
            pending: false,
            last_error: None,
        }
    }

    /// Create and initialize in one step
    pub fn open(client: HealthClient<T>, storage: S, storage_key: impl Into<String>) -> Self {
        let mut store = Self::new(client, storage, storage_key);
        store.initialize();
        store
    }

    /// Restore the persisted history, or start from the seed turn when it is
    /// missing, unreadable, or empty.
    ///
    /// When the storage itself cannot be read the seed is used in memory
    /// only; the next mutation tries to write again.
    pub fn initialize(&mut self) {
        match self.load_persisted() {
            Ok(Some(turns)) => {
                log::debug!("Restored {} turns from '{}'", turns.len(), self.storage_key);
                self.turns = turns;
            }
            Ok(None) => {
                self.turns = vec![Turn::seed()];
                self.persist();
            }
            Err(e) => {
                log::warn!("Error loading chat history: {}", e);
                self.turns = vec![Turn::seed()];
            }
        }
    }

    fn load_persisted(&self) -> Result<Option<Vec<Turn>>, StorageError> {
        let Some(raw) = self.storage.get(&self.storage_key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Turn>>(&raw) {
            Ok(turns) if !turns.is_empty() => Ok(Some(turns)),
            Ok(_) => {
                log::warn!("Stored chat history is empty, starting over");
                Ok(None)
            }
            Err(e) => {
                log::warn!("Error loading chat history: {}", e);
                Ok(None)
            }
        }
    }

    fn persist(&mut self) {
        if self.turns.is_empty() {
            return;
        }

        let result = serde_json::to_string(&self.turns)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(&self.storage_key, &json)
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = result {
            log::error!("Failed to save chat history: {}", e);
            self.last_error = Some(format!("Failed to save chat history: {}", e));
        }
    }

    /// Commit the user's message locally and return the request to send.
    ///
    /// Returns `None` without touching anything when the trimmed text is
    /// empty or a request is already pending.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatExchange> {
        let message = text.trim();
        if message.is_empty() || self.pending {
            return None;
        }

        self.last_error = None;
        // History is what the backend has not seen yet: everything before
        // this message
        let request = ChatRequest::new(message, &self.turns);

        self.turns.push(Turn::user(message));
        self.persist();
        self.pending = true;

        Some(ChatExchange { request })
    }

    /// Apply the backend's answer to the exchange started by `begin_send`
    pub fn finish_send(&mut self, result: Result<ChatResponse, ApiError>) -> SendOutcome {
        if !self.pending {
            log::warn!("Ignoring chat result with no request pending");
            return SendOutcome::Ignored;
        }
        self.pending = false;

        match result {
            Ok(response) => {
                self.turns.push(Turn::assistant(response.message));
                self.persist();
                SendOutcome::Replied
            }
            Err(e) => {
                log::error!("Error sending message: {}", e);
                let message = failure_message(&e, SEND_FAILURE_FALLBACK);
                self.last_error = Some(message.clone());
                SendOutcome::Failed(message)
            }
        }
    }

    /// Send a message and wait for the reply
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        let Some(exchange) = self.begin_send(text) else {
            return SendOutcome::Ignored;
        };
        let result = self.client.chat(&exchange.request).await;
        self.finish_send(result)
    }

    /// Reset to the seed turn and erase the stored copy, if `confirm`
    /// accepts [`CLEAR_HISTORY_PROMPT`]. Returns whether the history was
    /// cleared.
    pub fn clear_history<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_HISTORY_PROMPT) {
            return false;
        }

        self.turns = vec![Turn::seed()];
        if let Err(e) = self.storage.remove(&self.storage_key) {
            log::error!("Failed to erase chat history: {}", e);
            self.last_error = Some(format!("Failed to erase chat history: {}", e));
        }
        true
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Whether a send of `text` would be accepted right now
    pub fn can_send(&self, text: &str) -> bool {
        !self.pending && !text.trim().is_empty()
    }

    pub fn client(&self) -> &HealthClient<T> {
        &self.client
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

/// Message shown to the user for a failed request
pub(crate) fn failure_message(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, STORAGE_KEY};
    use async_trait::async_trait;
    use healthchat_api::Endpoint;
    use healthchat_types::{Role, SEED_GREETING};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    /// Transport for tests that never reach the network
    struct OfflineTransport;

    #[async_trait]
    impl Transport for OfflineTransport {
        async fn post_json(&self, _endpoint: &Endpoint, _body: Value) -> Result<Value, ApiError> {
            Err(ApiError::Network("offline".to_string()))
        }
    }

    /// Storage whose every operation fails, like a blocked `localStorage`
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("blocked".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("blocked".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("blocked".to_string()))
        }
    }

    fn open_store(storage: MemoryStore) -> ConversationStore<OfflineTransport, MemoryStore> {
        ConversationStore::open(HealthClient::new(OfflineTransport), storage, STORAGE_KEY)
    }

    #[test]
    fn test_initialize_without_history_seeds() {
        let store = open_store(MemoryStore::new());
        assert_eq!(store.turns(), &[Turn::seed()]);
        assert_eq!(store.turns()[0].content, SEED_GREETING);
    }

    #[test]
    fn test_initialize_adopts_stored_history() {
        let stored = r#"[{"role":"assistant","content":"hi"},{"role":"user","content":"my knee hurts"}]"#;
        let store = open_store(MemoryStore::with_entry(STORAGE_KEY, stored));

        assert_eq!(store.turns().len(), 2);
        assert_eq!(store.turns()[1], Turn::user("my knee hurts"));
    }

    #[test]
    fn test_initialize_with_corrupt_history_seeds() {
        for corrupt in ["not json", "{}", "[]", r#"[{"role":"nurse","content":"x"}]"#] {
            let storage = MemoryStore::with_entry(STORAGE_KEY, corrupt);
            let store = open_store(storage.clone());

            assert_eq!(store.turns(), &[Turn::seed()], "input: {}", corrupt);
            let rewritten: Vec<Turn> =
                serde_json::from_str(&storage.get(STORAGE_KEY).unwrap().unwrap()).unwrap();
            assert_eq!(rewritten, vec![Turn::seed()]);
        }
    }

    #[test]
    fn test_initialize_with_unreadable_storage_seeds_quietly() {
        let store = ConversationStore::open(HealthClient::new(OfflineTransport), BrokenStore, STORAGE_KEY);

        assert_eq!(store.turns(), &[Turn::seed()]);
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_begin_send_ignores_blank_input() {
        let mut store = open_store(MemoryStore::new());
        assert_eq!(store.begin_send(""), None);
        assert_eq!(store.begin_send("   \n"), None);
        assert_eq!(store.turns().len(), 1);
        assert!(!store.is_pending());
    }

    #[test]
    fn test_begin_send_is_optimistic_and_exclusive() {
        let mut store = open_store(MemoryStore::new());

        let exchange = store.begin_send("  hello ").unwrap();
        assert_eq!(exchange.request.message, "hello");
        assert_eq!(exchange.request.conversation_history.len(), 1);
        assert_eq!(store.turns().last(), Some(&Turn::user("hello")));
        assert!(store.is_pending());
        assert!(!store.can_send("again"));

        assert_eq!(store.begin_send("again"), None);
        assert_eq!(store.turns().len(), 2);
    }

    #[test]
    fn test_finish_send_without_pending_is_ignored() {
        let mut store = open_store(MemoryStore::new());
        let outcome = store.finish_send(Ok(ChatResponse {
            message: "stray".to_string(),
        }));
        assert_eq!(outcome, SendOutcome::Ignored);
        assert_eq!(store.turns().len(), 1);
    }

    #[test]
    fn test_new_send_clears_previous_error() {
        let mut store = open_store(MemoryStore::new());
        store.begin_send("first").unwrap();
        store.finish_send(Err(ApiError::Network("Failed to fetch".to_string())));
        assert_eq!(store.last_error(), Some("Failed to fetch"));

        store.begin_send("second").unwrap();
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_clear_history_declined_keeps_turns() {
        let storage = MemoryStore::new();
        let mut store = open_store(storage.clone());
        store.begin_send("hello").unwrap();

        let mut asked = String::new();
        let cleared = store.clear_history(|prompt| {
            asked = prompt.to_string();
            false
        });

        assert!(!cleared);
        assert_eq!(asked, CLEAR_HISTORY_PROMPT);
        assert_eq!(store.turns().len(), 2);
        assert!(storage.get(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_clear_history_confirmed_resets_and_erases() {
        let storage = MemoryStore::new();
        let mut store = open_store(storage.clone());
        store.begin_send("hello").unwrap();
        store.finish_send(Ok(ChatResponse {
            message: "hi".to_string(),
        }));

        assert!(store.clear_history(|_| true));
        assert_eq!(store.turns(), &[Turn::seed()]);
        assert_eq!(store.turns()[0].role, Role::Assistant);
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_failure_message_falls_back_when_blank() {
        let err = ApiError::Network(String::new());
        assert_eq!(failure_message(&err, SEND_FAILURE_FALLBACK), SEND_FAILURE_FALLBACK);
    }
}
