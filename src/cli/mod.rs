//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for NRPTI using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// NRPTI - Natural Resources Public Transparency Importer
#[derive(Parser, Debug)]
#[command(name = "nrpti")]
#[command(version, about, long_about = None)]
#[command(author = "NRPTI Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "nrpti.toml", env = "NRPTI_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NRPTI_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import records from a data source into the canonical collection
    Import(commands::import::ImportArgs),

    /// Rebuild the materialized search views
    UpdateViews(commands::update_views::UpdateViewsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::import::SourceKind;

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["nrpti", "import", "--source", "bcogc"]);
        assert_eq!(cli.config, "nrpti.toml");
        match cli.command {
            Commands::Import(args) => assert_eq!(args.source_kind(), SourceKind::Bcogc),
            other => panic!("expected import command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["nrpti", "--config", "custom.toml", "update-views"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::UpdateViews(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["nrpti", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_import_csv_path() {
        let cli = Cli::parse_from([
            "nrpti",
            "import",
            "--source",
            "cors",
            "--csv-path",
            "tickets.csv",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.csv_path.as_deref(), Some("tickets.csv"));
                assert!(args.dry_run);
            }
            other => panic!("expected import command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["nrpti", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
