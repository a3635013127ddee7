//! CLI interface module
//!
//! This module provides command-line interface functionality for folio.

pub mod commands;

use std::fmt;

use crate::cli::{BlogCommands, Commands, ConfigCommands};
use crate::config::get_config;
use crate::services::BlogService;
use commands::{
    blog_cache_info, blog_clear_cache, blog_fetch, config_generate, render_background,
};

#[derive(Debug)]
pub enum CliError {
    CacheError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::CacheError(msg) => format!("Cache error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::CacheError(msg) => {
                format!("{} {}", "Cache error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::FolioError> for CliError {
    fn from(err: crate::errors::FolioError) -> Self {
        match err {
            crate::errors::FolioError::CacheStore(msg) => CliError::CacheError(msg),
            crate::errors::FolioError::Serialization(msg) => CliError::ParseError(msg),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    let config = get_config();

    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Blog { action } => {
            let service = BlogService::from_config(&config.blog);
            match action {
                BlogCommands::Fetch => blog_fetch(&service).await,
                BlogCommands::CacheInfo { json } => blog_cache_info(&service, json),
                BlogCommands::ClearCache => blog_clear_cache(&service),
            }
        }

        Commands::Background {
            seed,
            width,
            height,
            output,
        } => render_background(&config.background, seed, width, height, output).await,

        Commands::Serve => unreachable!("server mode handled in main"),
    }
}
