//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted logs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use nrpti::logging::init_logging;
//! use nrpti::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an import run
///
/// # Example
///
/// ```no_run
/// use nrpti::log_import_start;
///
/// log_import_start!("bcogc", 250);
/// ```
#[macro_export]
macro_rules! log_import_start {
    ($source:expr, $total:expr) => {
        tracing::info!(
            source = %$source,
            total = $total,
            "Starting import"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use nrpti::log_error_with_context;
/// use nrpti::domain::NrptiError;
///
/// let error = NrptiError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
