use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use healthchat_api::ApiConfig;

use crate::cli::Cli;

/// Everything the commands need, resolved once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Resolve configuration from parsed flags. clap has already folded the
    /// environment variables into `cli`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => expand_tilde(dir)?,
            None => default_data_dir()?,
        };

        Ok(Self {
            api: ApiConfig::from_optional(cli.api_url.as_deref()),
            data_dir,
        })
    }
}

fn home_dir() -> Result<PathBuf> {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("Failed to get home directory")?;
    Ok(PathBuf::from(home))
}

/// `~/.healthchat`
pub fn default_data_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".healthchat"))
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home_dir()?.join(rest))
    } else if path_str == "~" {
        home_dir()
    } else {
        Ok(path.to_path_buf())
    }
}
