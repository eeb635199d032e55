//! Update-views command implementation
//!
//! This module implements the `update-views` command for rebuilding the
//! materialized search views without running an import.

use crate::adapters::mongo::{MongoRecordStore, MongoStoreClient};
use crate::adapters::store::RecordStore;
use crate::config::load_config;
use crate::core::views::ViewUpdater;
use clap::Args;
use std::sync::Arc;

/// Arguments for the update-views command
#[derive(Args, Debug)]
pub struct UpdateViewsArgs {
    /// Rebuild only the named subset (default: all)
    #[arg(long)]
    pub subset: Option<String>,
}

impl UpdateViewsArgs {
    /// Execute the update-views command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting update-views command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

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

        let store: Arc<dyn RecordStore> = Arc::new(MongoRecordStore::new(
            client,
            config.mongo.canonical_collection.clone(),
        ));
        let updater = ViewUpdater::new(store);

        match &self.subset {
            Some(name) => {
                println!("🔄 Rebuilding view subset '{name}'...");
                match updater.rebuild_one(name).await {
                    Ok(documents) => {
                        println!("✅ Rebuilt '{name}' with {documents} documents");
                        Ok(0)
                    }
                    Err(e) => {
                        tracing::error!(subset = %name, error = %e, "View rebuild failed");
                        eprintln!("View rebuild failed: {e}");
                        Ok(5) // Fatal error exit code
                    }
                }
            }
            None => {
                println!("🔄 Rebuilding all view subsets...");
                let report = match updater.rebuild_all().await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::error!(error = %e, "View rebuild failed");
                        eprintln!("View rebuild failed: {e}");
                        return Ok(5);
                    }
                };

                println!();
                for outcome in &report.outcomes {
                    match &outcome.error {
                        None => {
                            println!("  ✅ {}: {} documents", outcome.subset, outcome.documents)
                        }
                        Some(error) => println!("  ❌ {}: {error}", outcome.subset),
                    }
                }
                println!();

                if report.failed() > 0 {
                    println!("⚠️  {} subset(s) failed to rebuild", report.failed());
                    Ok(1) // Partial success
                } else {
                    println!("✅ All view subsets rebuilt");
                    Ok(0)
                }
            }
        }
    }
}
