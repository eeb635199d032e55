//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the NRPTI configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing, so a returned config is valid
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  MongoDB Database: {}", config.mongo.database);
        println!(
            "  Canonical Collection: {}",
            config.mongo.canonical_collection
        );

        match &config.core_api {
            Some(core_api) => {
                println!("  CORE API: {}", core_api.base_url);
                println!("  CORE Page Size: {}", core_api.page_size);
                println!(
                    "  CORE Token Buffer: {}s",
                    core_api.token_buffer_seconds
                );
            }
            None => println!("  CORE API: not configured"),
        }

        println!("  Audit User: {}", config.import.audit_user);
        println!("  Read Roles: {:?}", config.import.read_roles);
        println!("  Rebuild Views: {}", config.import.rebuild_views);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        // Just ensure it compiles and can be created
        let _ = format!("{args:?}");
    }
}
