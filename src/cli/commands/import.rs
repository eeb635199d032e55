//! Import command implementation
//!
//! This module implements the `import` command for ingesting records
//! from a data source into the canonical collection.

use crate::adapters::core_api::CoreApiClient;
use crate::adapters::mongo::{MongoRecordStore, MongoStoreClient};
use crate::adapters::store::{InMemoryRecordStore, RecordStore};
use crate::config::load_config;
use crate::core::build::ImportDefaults;
use crate::core::import::{ImportCoordinator, ImportSummary, SourceKind};
use crate::core::views::ViewUpdater;
use clap::{Args, ValueEnum};
use std::sync::Arc;
use tokio::sync::watch;

/// Importable data sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// BC Oil and Gas Commission enforcement orders (CSV)
    Bcogc,
    /// Conservation Officer Service tickets (CSV)
    Cors,
    /// Environmental administrative penalties (CSV)
    Era,
    /// CORE mines records (authenticated API)
    Core,
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Data source to import from
    #[arg(long, value_enum)]
    pub source: SourceArg,

    /// Path to the source CSV file (required for CSV sources)
    #[arg(long)]
    pub csv_path: Option<String>,

    /// Dry run mode - import into an in-memory store, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the materialized view rebuild after the batch
    #[arg(long)]
    pub skip_views: bool,
}

impl ImportArgs {
    /// The coordinator-level source for the CLI argument
    pub fn source_kind(&self) -> SourceKind {
        match self.source {
            SourceArg::Bcogc => SourceKind::Bcogc,
            SourceArg::Cors => SourceKind::Cors,
            SourceArg::Era => SourceKind::Era,
            SourceArg::Core => SourceKind::Core,
        }
    }

    /// Execute the import command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting import command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        let kind = self.source_kind();

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        // Pick the store: dry runs import into memory and throw it away
        let store: Arc<dyn RecordStore> = if config.application.dry_run {
            Arc::new(InMemoryRecordStore::new())
        } else {
            let client = match MongoStoreClient::connect(&config.mongo).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to connect to MongoDB");
                    eprintln!("Failed to connect to MongoDB: {e}");
                    return Ok(4); // Connection error exit code
                }
            };
            if let Err(e) = client.test_connection().await {
                tracing::error!(error = %e, "MongoDB connection test failed");
                eprintln!("MongoDB connection test failed: {e}");
                return Ok(4);
            }
            Arc::new(MongoRecordStore::new(
                client,
                config.mongo.canonical_collection.clone(),
            ))
        };

        let coordinator = ImportCoordinator::new(
            store.clone(),
            ImportDefaults::from_config(&config.import),
        )
        .with_shutdown(shutdown_signal);

        println!("🚀 Starting {} import...", kind.name());
        println!();

        let result = match kind {
            SourceKind::Core => {
                let api_config = match config.core_api.clone() {
                    Some(c) => c,
                    None => {
                        eprintln!(
                            "The 'core' source requires a [core_api] configuration section"
                        );
                        return Ok(2);
                    }
                };
                let client = match CoreApiClient::new(api_config) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to build CORE API client");
                        eprintln!("Failed to build CORE API client: {e}");
                        return Ok(2);
                    }
                };
                coordinator.import_core(&client).await
            }
            _ => {
                let path = match &self.csv_path {
                    Some(path) => path.clone(),
                    None => {
                        eprintln!(
                            "The '{}' source is file-based; pass --csv-path",
                            kind.name()
                        );
                        return Ok(2);
                    }
                };
                coordinator.import_csv(kind, path).await
            }
        };

        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Import failed");
                eprintln!("Import failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_summary(&summary);

        // Rebuild views after the batch unless configured or asked not to
        if config.import.rebuild_views && !self.skip_views && !summary.interrupted {
            let updater = ViewUpdater::new(store);
            match updater.rebuild_all().await {
                Ok(report) => {
                    println!(
                        "🔄 Rebuilt {} of {} view subsets",
                        report.succeeded(),
                        report.outcomes.len()
                    );
                    for outcome in &report.outcomes {
                        match &outcome.error {
                            None => println!(
                                "  - {}: {} documents",
                                outcome.subset, outcome.documents
                            ),
                            Some(error) => {
                                println!("  - {}: FAILED ({error})", outcome.subset)
                            }
                        }
                    }
                    println!();
                }
                Err(e) => {
                    tracing::error!(error = %e, "View rebuild failed");
                    eprintln!("View rebuild failed: {e}");
                    return Ok(1);
                }
            }
        }

        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Import interrupted gracefully.");
            println!("   Re-running the same command resumes safely: imports are idempotent.");
            println!();
            tracing::info!("Import interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.has_failures() {
            println!("⚠️  Import completed with failures");
            1 // Partial success
        } else {
            println!("✅ Import completed successfully!");
            0
        };

        Ok(exit_code)
    }
}

fn print_summary(summary: &ImportSummary) {
    println!();
    println!("📊 Import Summary:");
    println!("  Source: {}", summary.source);
    println!("  Total Rows: {}", summary.total);
    println!("  Created: {}", summary.created);
    println!("  Updated: {}", summary.updated);
    println!("  Failed: {}", summary.failed());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for (i, error) in summary.errors.iter().enumerate() {
            if i < 10 {
                println!("  - {}: {}", error.source_ref, error.message);
            }
        }
        if summary.errors.len() > 10 {
            println!("    ... and {} more failures", summary.errors.len() - 10);
        }
        println!();
    }
}
