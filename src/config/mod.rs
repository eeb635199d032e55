//! Configuration management for the ingestion pipeline.
//!
//! This module provides TOML-based configuration loading, parsing and
//! validation.
//!
//! # Overview
//!
//! The pipeline uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `NRPTI_*` environment variable overrides
//! - Default values for optional settings
//! - Per-section validation
//! - `secrecy`-protected credentials
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [mongo]
//! connection_string = "${NRPTI_MONGO_CONNECTION_STRING}"
//! database = "nrpti"
//!
//! [core_api]
//! base_url = "https://minesdigitalservices.gov.bc.ca/api"
//! token_url = "https://sso.pathfinder.gov.bc.ca/auth/token"
//! client_id = "nrpti-importer"
//! client_secret = "${NRPTI_CORE_API_CLIENT_SECRET}"
//!
//! [import]
//! audit_user = "SYSTEM_USER"
//! rebuild_views = true
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nrpti::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("nrpti.toml")?;
//! println!("Database: {}", config.mongo.database);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CoreApiConfig, Environment, ImportConfig, LoggingConfig, MongoConfig,
    NrptiConfig, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
