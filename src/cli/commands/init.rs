//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "nrpti.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing NRPTI configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set NRPTI_MONGO_URI for the canonical database");
                println!("     - Set NRPTI_CORE_CLIENT_SECRET (if importing the core source)");
                println!("  3. Validate configuration: nrpti validate-config");
                println!("  4. Run an import: nrpti import --source bcogc --csv-path orders.csv");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# NRPTI Configuration File
# Natural Resources Public Transparency Importer

environment = "development"  # development | staging | production

[application]
log_level = "info"
dry_run = false

[mongo]
connection_string = "${NRPTI_MONGO_URI}"
database = "nrpti"
canonical_collection = "nrpti"
timeout_seconds = 30

[import]
audit_user = "SYSTEM_USER"
read_roles = ["sysadmin"]
write_roles = ["sysadmin"]
rebuild_views = true

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        let mut config = Self::generate_minimal_config();
        config.push_str(
            r#"
# CORE mines API (only needed for `import --source core`)
# [core_api]
# base_url = "https://minesdigitalservices.gov.bc.ca/api"
# token_url = "https://minesdigitalservices.gov.bc.ca/oauth/token"
# client_id = "nrpti-importer"
# client_secret = "${NRPTI_CORE_CLIENT_SECRET}"
# grant_type = "client_credentials"
# token_buffer_seconds = 30
# page_size = 100
# timeout_seconds = 30

# [core_api.retry]
# max_retries = 3
# initial_delay_ms = 500
# max_delay_ms = 10000
# backoff_multiplier = 2.0

# File logging for scheduled runs
# [logging]
# local_enabled = true
# local_path = "logs"
# local_rotation = "daily"  # daily | hourly
"#,
        );
        config
    }
}
