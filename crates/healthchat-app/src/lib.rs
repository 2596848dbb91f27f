//! Terminal front-end for the AI health assistant

pub mod cli;
pub mod commands;
pub mod config;
pub mod repl;
pub mod transcript;

pub use cli::{Cli, Commands, HistoryCommands};
pub use config::AppConfig;
