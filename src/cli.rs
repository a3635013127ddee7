//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for folio using clap's derive macros.

use clap::{Parser, Subcommand};

/// folio - portfolio & blog backend
#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Backend for a personal portfolio and blog site", long_about = None)]
pub struct Cli {
    /// Config file path (default: folio.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Blog content cache
    Blog {
        #[command(subcommand)]
        action: BlogCommands,
    },

    /// Render a background image to SVG
    Background {
        /// Seed (default: random)
        #[arg(long)]
        seed: Option<u32>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: folio.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Blog cache commands
#[derive(Subcommand, Debug)]
pub enum BlogCommands {
    /// Fetch the remote blog source and refresh the persisted cache
    Fetch,

    /// Show persisted cache status
    CacheInfo {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the persisted cache
    ClearCache,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["folio", "blog", "fetch", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        assert!(matches!(
            cli.command,
            Some(Commands::Blog {
                action: BlogCommands::Fetch
            })
        ));
    }

    #[test]
    fn test_background_args() {
        let cli = Cli::try_parse_from([
            "folio",
            "background",
            "--seed",
            "42",
            "--width",
            "800",
            "-o",
            "bg.svg",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Background {
                seed,
                width,
                height,
                output,
            }) => {
                assert_eq!(seed, Some(42));
                assert_eq!(width, Some(800));
                assert_eq!(height, None);
                assert_eq!(output.as_deref(), Some("bg.svg"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cache_info_json_flag() {
        let cli = Cli::try_parse_from(["folio", "blog", "cache-info", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Blog {
                action: BlogCommands::CacheInfo { json: true }
            })
        ));
    }
}
