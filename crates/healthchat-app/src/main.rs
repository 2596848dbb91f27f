use anyhow::Result;
use clap::Parser;

use healthchat::commands::{clear_history, run_symptoms, show_history};
use healthchat::repl::run_chat;
use healthchat::{AppConfig, Cli, Commands, HistoryCommands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = AppConfig::from_cli(&cli)?;
    log::debug!("Using backend {} and data dir {}", config.api.base_url, config.data_dir.display());

    match &cli.command {
        Commands::Chat { transcript } => run_chat(&config, *transcript).await,
        Commands::Symptoms { symptoms } => run_symptoms(&config, symptoms).await,
        Commands::History { command } => match command {
            HistoryCommands::Show => show_history(&config),
            HistoryCommands::Clear { yes } => clear_history(&config, *yes),
        },
    }
}
