use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use healthchat_types::Role;

#[derive(Serialize)]
struct TranscriptEntry<'a> {
    timestamp: String, // ISO-8601 local time
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Append-only JSONL record of a chat session
pub struct TranscriptLogger {
    file_path: PathBuf,
    file: tokio::fs::File,
}

impl TranscriptLogger {
    /// Create `<data_dir>/transcripts/chat-<local time>.jsonl`
    pub async fn new(data_dir: &Path) -> Result<Self> {
        let dir = data_dir.join("transcripts");
        fs::create_dir_all(&dir).await?;

        let filename = format!("chat-{}.jsonl", Local::now().format("%Y-%m-%d-%H%M%S"));
        let file_path = dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;

        Ok(Self { file_path, file })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub async fn log_turn(&mut self, role: Role, content: &str) {
        self.write(TranscriptEntry {
            timestamp: Local::now().to_rfc3339(),
            role: role.as_str(),
            content,
            error: None,
        })
        .await;
    }

    pub async fn log_error(&mut self, message: &str) {
        self.write(TranscriptEntry {
            timestamp: Local::now().to_rfc3339(),
            role: "error",
            content: "",
            error: Some(message),
        })
        .await;
    }

    // Transcript problems never interrupt the chat
    async fn write(&mut self, entry: TranscriptEntry<'_>) {
        let mut line = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Skipping transcript entry: {}", e);
                return;
            }
        };
        line.push('\n');
        if let Err(e) = self.file.write_all(line.as_bytes()).await {
            log::warn!("Failed to write transcript {}: {}", self.file_path.display(), e);
        }
    }
}
