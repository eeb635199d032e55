// NRPTI - Natural Resources Public Transparency Importer
// Copyright (c) 2025 NRPTI Contributors
// Licensed under the MIT License

use clap::Parser;
use nrpti::cli::{Cli, Commands};
use nrpti::config::{load_config, LoggingConfig};
use nrpti::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging from the config file's [logging] section
    let (log_level, logging_config) = logging_setup(&cli);
    if let Err(e) = init_logging(&log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "NRPTI - Natural Resources Public Transparency Importer"
    );

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn signal handler task
    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to create SIGTERM handler");

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                    println!("\n⚠️  Shutdown signal received, completing current record...");
                    let _ = shutdown_tx_clone.send(true);
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                    println!("\n⚠️  Shutdown signal received, completing current record...");
                    let _ = shutdown_tx_clone.send(true);
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                println!("\n⚠️  Shutdown signal received, completing current record...");
                let _ = shutdown_tx_clone.send(true);
            }
        }
    });

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Resolve the log level and `[logging]` settings for this run
///
/// The `--log-level` flag wins over the config file's `log_level`; file
/// output comes from the config's `[logging]` section. A config file that
/// is missing or invalid falls back to console-only defaults here — the
/// command re-loads it and reports the error with the right exit code.
fn logging_setup(cli: &Cli) -> (String, LoggingConfig) {
    let loaded = match &cli.command {
        // `init` runs before a config file exists
        Commands::Init(_) => None,
        _ => load_config(&cli.config).ok(),
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| {
            loaded
                .as_ref()
                .map(|config| config.application.log_level.clone())
        })
        .unwrap_or_else(|| "info".to_string());
    let logging = loaded.map(|config| config.logging).unwrap_or_default();

    (level, logging)
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Import(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::UpdateViews(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[application]
log_level = "debug"

[mongo]
connection_string = "mongodb://localhost:27017"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "hourly"
"#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_logging_setup_applies_config_file() {
        let file = config_file();
        let path = file.path().to_str().unwrap();
        let cli = Cli::parse_from(["nrpti", "--config", path, "update-views"]);

        let (level, logging) = logging_setup(&cli);
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_rotation, "hourly");
    }

    #[test]
    fn test_logging_setup_flag_wins_over_config() {
        let file = config_file();
        let path = file.path().to_str().unwrap();
        let cli = Cli::parse_from(["nrpti", "--config", path, "--log-level", "warn", "update-views"]);

        let (level, _) = logging_setup(&cli);
        assert_eq!(level, "warn");
    }

    #[test]
    fn test_logging_setup_defaults_without_config() {
        let cli = Cli::parse_from(["nrpti", "--config", "no-such-file.toml", "update-views"]);

        let (level, logging) = logging_setup(&cli);
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);
    }
}
