use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use healthchat_api::{HealthClient, HttpTransport};
use healthchat_core::{ConversationStore, FileStore, SendOutcome, STORAGE_KEY};
use healthchat_types::{Role, Turn};

use crate::config::AppConfig;
use crate::transcript::TranscriptLogger;

/// Open the persisted conversation for the configured data directory
pub fn open_conversation(config: &AppConfig) -> Result<ConversationStore<HttpTransport, FileStore>> {
    let storage = FileStore::new(&config.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.data_dir.display()))?;
    let client = HealthClient::new(HttpTransport::new(&config.api.base_url));
    Ok(ConversationStore::open(client, storage, STORAGE_KEY))
}

pub fn print_turn(turn: &Turn) {
    let label = match turn.role {
        Role::User => "You".bright_green().bold(),
        Role::Assistant => "Assistant".bright_cyan().bold(),
        Role::System => "System".bright_black().bold(),
    };
    println!("{}: {}\n", label, turn.content);
}

/// Ask a yes/no question on the terminal; anything but y/yes is a no
pub fn confirm(editor: &mut DefaultEditor, prompt: &str) -> bool {
    match editor.readline(&format!("{} [y/N] ", prompt)) {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Run interactive chat mode
pub async fn run_chat(config: &AppConfig, transcript: bool) -> Result<()> {
    println!("{}", "🩺 AI Health Assistant".bright_cyan().bold());
    println!("{}", "Not a substitute for medical advice.".yellow());
    println!(
        "{}",
        format!("Backend: {} • /clear resets history, /quit exits\n", config.api.base_url).bright_black()
    );

    let mut store = open_conversation(config)?;
    let mut logger = if transcript {
        match TranscriptLogger::new(&config.data_dir).await {
            Ok(logger) => {
                println!("{}", format!("Transcript: {}", logger.path().display()).bright_black());
                Some(logger)
            }
            Err(e) => {
                eprintln!("Transcript disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    for turn in store.turns() {
        print_turn(turn);
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/clear" => {
                if store.clear_history(|prompt| confirm(&mut editor, prompt)) {
                    println!("{}", "History cleared.\n".bright_black());
                    if let Some(turn) = store.turns().first() {
                        print_turn(turn);
                    }
                }
                continue;
            }
            "" => continue,
            _ => {}
        }

        let _ = editor.add_history_entry(line.as_str());
        if let Some(logger) = logger.as_mut() {
            logger.log_turn(Role::User, line.trim()).await;
        }

        println!("{}", "Thinking...".bright_black());
        match store.send_message(&line).await {
            SendOutcome::Replied => {
                if let Some(turn) = store.turns().last() {
                    print_turn(turn);
                    if let Some(logger) = logger.as_mut() {
                        logger.log_turn(turn.role, &turn.content).await;
                    }
                }
                // Only a failed save can leave an error behind a reply
                if let Some(error) = store.last_error() {
                    eprintln!("{} {}\n", "Warning:".yellow().bold(), error);
                }
            }
            SendOutcome::Failed(message) => {
                eprintln!("{} {}\n", "Error:".red().bold(), message);
                if let Some(logger) = logger.as_mut() {
                    logger.log_error(&message).await;
                }
            }
            SendOutcome::Ignored => {}
        }
    }

    println!("{}", "Take care!".bright_cyan());
    Ok(())
}
