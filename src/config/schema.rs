//! Configuration schema types
//!
//! This module defines the configuration structure for the ingestion
//! pipeline. Each section owns its own `validate()`; the root config
//! stitches them together.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main pipeline configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NrptiConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// MongoDB connection for the canonical collection and view subsets
    pub mongo: MongoConfig,

    /// CORE API configuration (required only when importing the core source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_api: Option<CoreApiConfig>,

    /// Import behaviour settings
    #[serde(default)]
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NrptiConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.mongo.validate()?;
        if let Some(ref core_api) = self.core_api {
            core_api.validate(&self.environment)?;
        }
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (don't write to MongoDB)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string (mongodb:// or mongodb+srv://)
    /// Stored securely in memory and automatically zeroized on drop
    pub connection_string: SecretString,

    /// Database holding the canonical collection and view subsets
    #[serde(default = "default_database")]
    pub database: String,

    /// Canonical collection name
    #[serde(default = "default_canonical_collection")]
    pub canonical_collection: String,

    /// Server selection / operation timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl MongoConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let conn = self.connection_string.expose_secret();
        if conn.is_empty() {
            return Err("mongo.connection_string cannot be empty".to_string());
        }
        if !conn.starts_with("mongodb://") && !conn.starts_with("mongodb+srv://") {
            return Err(
                "mongo.connection_string must start with mongodb:// or mongodb+srv://".to_string(),
            );
        }

        if self.database.is_empty() {
            return Err("mongo.database cannot be empty".to_string());
        }

        if self.canonical_collection.is_empty() {
            return Err("mongo.canonical_collection cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "mongo.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        Ok(())
    }
}

/// CORE API configuration
///
/// Credentials for the authenticated mines API: a client-credentials
/// token grant plus the record search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreApiConfig {
    /// Base URL of the CORE API
    pub base_url: String,

    /// Token endpoint URL for the client-credentials grant
    pub token_url: String,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    /// Stored securely in memory and automatically zeroized on drop
    pub client_secret: SecretString,

    /// Grant type sent to the token endpoint
    #[serde(default = "default_grant_type")]
    pub grant_type: String,

    /// Seconds subtracted from the token lifetime before refreshing.
    /// A token is treated as expired this many seconds early so an
    /// in-flight request never carries a token that lapses mid-call.
    #[serde(default = "default_token_buffer_seconds")]
    pub token_buffer_seconds: u64,

    /// Page size for record search requests
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration for record fetches (never applied to token
    /// acquisition)
    #[serde(default)]
    pub retry: RetryConfig,
}

impl CoreApiConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let base = Url::parse(&self.base_url)
            .map_err(|e| format!("core_api.base_url is not a valid URL: {e}"))?;
        let token = Url::parse(&self.token_url)
            .map_err(|e| format!("core_api.token_url is not a valid URL: {e}"))?;

        // Plain-HTTP credentials are a development-only affordance
        if *environment == Environment::Production
            && (base.scheme() != "https" || token.scheme() != "https")
        {
            return Err(
                "core_api URLs must use https in production environments".to_string(),
            );
        }

        if self.client_id.is_empty() {
            return Err("core_api.client_id cannot be empty".to_string());
        }

        if self.client_secret.expose_secret().is_empty() {
            return Err("core_api.client_secret cannot be empty".to_string());
        }

        if self.token_buffer_seconds > 300 {
            return Err(format!(
                "core_api.token_buffer_seconds must be <= 300, got {}",
                self.token_buffer_seconds
            ));
        }

        if !(1..=1000).contains(&self.page_size) {
            return Err(format!(
                "core_api.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Import behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Audit user stamped on imported records
    #[serde(default = "default_audit_user")]
    pub audit_user: String,

    /// Roles granted read access on imported records
    #[serde(default = "default_roles")]
    pub read_roles: Vec<String>,

    /// Roles granted write access on imported records
    #[serde(default = "default_roles")]
    pub write_roles: Vec<String>,

    /// Rebuild all materialized view subsets after each import batch
    #[serde(default = "default_true")]
    pub rebuild_views: bool,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.audit_user.is_empty() {
            return Err("import.audit_user cannot be empty".to_string());
        }
        if self.read_roles.is_empty() {
            return Err("import.read_roles cannot be empty".to_string());
        }
        if self.write_roles.is_empty() {
            return Err("import.write_roles cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            audit_user: default_audit_user(),
            read_roles: default_roles(),
            write_roles: default_roles(),
            rebuild_views: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling file output (console output is always on)
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// File rotation strategy (daily or hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database() -> String {
    "nrpti".to_string()
}

fn default_canonical_collection() -> String {
    "nrpti".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_grant_type() -> String {
    "client_credentials".to_string()
}

fn default_token_buffer_seconds() -> u64 {
    30
}

fn default_page_size() -> usize {
    100
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_audit_user() -> String {
    "SYSTEM_USER".to_string()
}

fn default_roles() -> Vec<String> {
    vec!["sysadmin".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn base_config() -> NrptiConfig {
        NrptiConfig {
            application: ApplicationConfig::default(),
            environment: Environment::Development,
            mongo: MongoConfig {
                connection_string: secret_string("mongodb://localhost:27017".to_string()),
                database: default_database(),
                canonical_collection: default_canonical_collection(),
                timeout_seconds: default_timeout_seconds(),
            },
            core_api: None,
            import: ImportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    fn core_api_config() -> CoreApiConfig {
        CoreApiConfig {
            base_url: "https://minesdigitalservices.gov.bc.ca/api".to_string(),
            token_url: "https://sso.gov.bc.ca/auth/token".to_string(),
            client_id: "nrpti-importer".to_string(),
            client_secret: secret_string("secret".to_string()),
            grant_type: default_grant_type(),
            token_buffer_seconds: default_token_buffer_seconds(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = base_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = base_config();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn test_invalid_connection_string_scheme() {
        let mut config = base_config();
        config.mongo.connection_string = secret_string("postgres://localhost".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("mongodb://"));
    }

    #[test]
    fn test_core_api_validation() {
        let mut config = base_config();
        config.core_api = Some(core_api_config());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_core_api_invalid_url() {
        let mut config = base_config();
        let mut core_api = core_api_config();
        core_api.base_url = "not a url".to_string();
        config.core_api = Some(core_api);
        let err = config.validate().unwrap_err();
        assert!(err.contains("core_api.base_url"));
    }

    #[test]
    fn test_production_requires_https() {
        let mut config = base_config();
        config.environment = Environment::Production;
        let mut core_api = core_api_config();
        core_api.base_url = "http://minesdigitalservices.gov.bc.ca/api".to_string();
        config.core_api = Some(core_api);
        let err = config.validate().unwrap_err();
        assert!(err.contains("https"));
    }

    #[test]
    fn test_token_buffer_bounds() {
        let mut config = base_config();
        let mut core_api = core_api_config();
        core_api.token_buffer_seconds = 301;
        config.core_api = Some(core_api);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_import_defaults() {
        let import = ImportConfig::default();
        assert_eq!(import.audit_user, "SYSTEM_USER");
        assert_eq!(import.read_roles, vec!["sysadmin".to_string()]);
        assert!(import.rebuild_views);
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = base_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
