//! Client-side state for the health assistant
//!
//! Two independent state managers, each owning its data and talking to the
//! backend only through an injected [`HealthClient`](healthchat_api::HealthClient):
//!
//! - [`ConversationStore`]: ordered chat turns, persisted through a
//!   [`KeyValueStore`] after every change
//! - [`SymptomSession`]: a duplicate-free symptom list and the latest analysis
//!
//! Both allow at most one request in flight. Front-ends that cannot hold a
//! mutable borrow across an await use the `begin_*`/`finish_*` pairs; everyone
//! else calls `send_message` / `analyze`.

pub mod conversation;
pub mod error;
pub mod storage;
pub mod symptoms;

pub use conversation::{ChatExchange, ConversationStore, SendOutcome, CLEAR_HISTORY_PROMPT};
pub use error::{SessionError, StorageError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, STORAGE_KEY};
pub use symptoms::{AnalyzeOutcome, SymptomSession};
