//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::NrptiConfig;
use crate::config::secret_string;
use crate::domain::errors::NrptiError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into NrptiConfig
/// 4. Applies environment variable overrides (NRPTI_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use nrpti::config::loader::load_config;
///
/// let config = load_config("nrpti.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NrptiConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NrptiError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NrptiError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: NrptiConfig = toml::from_str(&contents)
        .map_err(|e| NrptiError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        NrptiError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NrptiError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the NRPTI_* prefix
///
/// Environment variables follow the pattern: NRPTI_<SECTION>_<KEY>
/// For example: NRPTI_MONGO_DATABASE, NRPTI_CORE_API_CLIENT_ID
fn apply_env_overrides(config: &mut NrptiConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("NRPTI_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("NRPTI_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Mongo overrides
    if let Ok(val) = std::env::var("NRPTI_MONGO_CONNECTION_STRING") {
        config.mongo.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("NRPTI_MONGO_DATABASE") {
        config.mongo.database = val;
    }
    if let Ok(val) = std::env::var("NRPTI_MONGO_CANONICAL_COLLECTION") {
        config.mongo.canonical_collection = val;
    }

    // CORE API overrides (only if the section is configured)
    if let Some(ref mut core_api) = config.core_api {
        if let Ok(val) = std::env::var("NRPTI_CORE_API_BASE_URL") {
            core_api.base_url = val;
        }
        if let Ok(val) = std::env::var("NRPTI_CORE_API_TOKEN_URL") {
            core_api.token_url = val;
        }
        if let Ok(val) = std::env::var("NRPTI_CORE_API_CLIENT_ID") {
            core_api.client_id = val;
        }
        if let Ok(val) = std::env::var("NRPTI_CORE_API_CLIENT_SECRET") {
            core_api.client_secret = secret_string(val);
        }
        if let Ok(val) = std::env::var("NRPTI_CORE_API_PAGE_SIZE") {
            if let Ok(size) = val.parse() {
                core_api.page_size = size;
            }
        }
    }

    // Import overrides
    if let Ok(val) = std::env::var("NRPTI_IMPORT_AUDIT_USER") {
        config.import.audit_user = val;
    }
    if let Ok(val) = std::env::var("NRPTI_IMPORT_REBUILD_VIEWS") {
        config.import.rebuild_views = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("NRPTI_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("NRPTI_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
