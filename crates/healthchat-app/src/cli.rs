use clap::{Parser, Subcommand};
use std::path::PathBuf;

use healthchat_api::API_URL_ENV;

/// CLI arguments for healthchat
#[derive(Parser, Debug)]
#[command(name = "healthchat")]
#[command(about = "AI Health Assistant - chat and symptom checker in your terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the health assistant backend (e.g., http://localhost:5000)
    #[arg(long, global = true, value_name = "URL", env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Directory for the saved chat history (default: ~/.healthchat)
    #[arg(long, global = true, value_name = "DIR", env = "HEALTHCHAT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log requests and responses
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Chat with the assistant; history is kept between runs
    Chat {
        /// Also append every turn to a JSONL transcript in the data directory
        #[arg(long)]
        transcript: bool,
    },

    /// Analyse a list of symptoms once
    Symptoms {
        /// Symptoms, e.g. `healthchat symptoms headache "sore throat"`
        #[arg(required = true, value_name = "SYMPTOM")]
        symptoms: Vec<String>,
    },

    /// Inspect or erase the saved chat history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum HistoryCommands {
    /// Print the saved conversation
    Show,

    /// Reset the conversation to the greeting
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
