use anyhow::{bail, Result};
use colored::Colorize;
use rustyline::DefaultEditor;

use healthchat_api::{HealthClient, HttpTransport};
use healthchat_core::{AnalyzeOutcome, SymptomSession};

use crate::config::AppConfig;
use crate::repl::{confirm, open_conversation, print_turn};

/// One-shot symptom analysis
pub async fn run_symptoms(config: &AppConfig, symptoms: &[String]) -> Result<()> {
    let client = HealthClient::new(HttpTransport::new(&config.api.base_url));
    let mut session = SymptomSession::new(client);
    for symptom in symptoms {
        if !session.add_symptom(symptom) {
            log::debug!("Skipping blank or repeated symptom {:?}", symptom);
        }
    }

    println!(
        "{} {}",
        "Analyzing:".bright_cyan().bold(),
        session.symptoms().join(", ")
    );

    match session.analyze().await {
        AnalyzeOutcome::Analyzed => {}
        AnalyzeOutcome::Rejected(e) => bail!(e),
        AnalyzeOutcome::Failed(message) => bail!(message),
        AnalyzeOutcome::Ignored => bail!("An analysis is already running"),
    }

    if let Some(result) = session.result() {
        println!("\n{}\n", "Analysis Results".bright_cyan().bold());
        println!("{}\n", result.analysis_text);
        println!("{}", "Important Disclaimer".yellow().bold());
        println!("{}\n", result.disclaimer_text.yellow());
    }
    println!(
        "{}",
        "If you are experiencing severe symptoms, chest pain, or difficulty breathing, call emergency services immediately."
            .red()
    );
    Ok(())
}

/// Print the saved conversation
pub fn show_history(config: &AppConfig) -> Result<()> {
    let store = open_conversation(config)?;
    for turn in store.turns() {
        print_turn(turn);
    }
    Ok(())
}

/// Reset the saved conversation, asking first unless `yes`
pub fn clear_history(config: &AppConfig, yes: bool) -> Result<()> {
    let mut store = open_conversation(config)?;

    let cleared = if yes {
        store.clear_history(|_| true)
    } else {
        let mut editor = DefaultEditor::new()?;
        store.clear_history(|prompt| confirm(&mut editor, prompt))
    };

    if let Some(error) = store.last_error() {
        bail!(error.to_string());
    }
    if cleared {
        println!("{}", "Chat history cleared.".green());
    } else {
        println!("{}", "Nothing changed.".bright_black());
    }
    Ok(())
}
