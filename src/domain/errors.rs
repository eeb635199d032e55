//! Domain error types
//!
//! This module defines the error hierarchy for the ingestion pipeline.
//! All errors are domain-specific and don't expose third-party types.
//!
//! Field-level extraction anomalies are deliberately *not* represented
//! here: extractors absorb missing or unrecognized input by returning
//! `None`, because real-world source data is dirty and a single bad
//! field must never abort a row. The variants below cover the failures
//! that are surfaced: per-record (`UnsupportedRecordType`,
//! `PersistenceFailed`), per-source (`AuthenticationFailed`,
//! `SourceFetch`) and per-subset (`ViewRebuildFailed`).

use thiserror::Error;

/// Main error type for the ingestion pipeline
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum NrptiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Canonical store / database errors
    #[error("Database error: {0}")]
    Database(String),

    /// A source declared a record type the resolver does not know.
    ///
    /// Surfaced rather than defaulted: routing a record to the wrong
    /// sub-resource would corrupt the canonical collection's type
    /// invariant. Aborts the single record; the batch continues.
    #[error("Unsupported record type: {record_type}")]
    UnsupportedRecordType { record_type: String },

    /// Token acquisition or credential failure against the CORE API
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Canonical store write failure for a single record
    #[error("Failed to persist record {record_ref}: {message}")]
    PersistenceFailed { record_ref: String, message: String },

    /// A single materialized-view subset failed to rebuild
    #[error("Failed to rebuild view subset '{subset}': {message}")]
    ViewRebuildFailed { subset: String, message: String },

    /// A view rebuild was requested while another is in progress
    #[error("A materialized view rebuild is already in progress")]
    ViewRebuildInProgress,

    /// Failure fetching rows from an external source (network, HTTP status)
    #[error("Source fetch error: {0}")]
    SourceFetch(String),

    /// CSV parse errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl NrptiError {
    /// Build a `PersistenceFailed` error for a record reference
    pub fn persistence(record_ref: impl Into<String>, message: impl Into<String>) -> Self {
        NrptiError::PersistenceFailed {
            record_ref: record_ref.into(),
            message: message.into(),
        }
    }

    /// Build a `ViewRebuildFailed` error for a subset name
    pub fn view_rebuild(subset: impl Into<String>, message: impl Into<String>) -> Self {
        NrptiError::ViewRebuildFailed {
            subset: subset.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for NrptiError {
    fn from(err: std::io::Error) -> Self {
        NrptiError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for NrptiError {
    fn from(err: serde_json::Error) -> Self {
        NrptiError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for NrptiError {
    fn from(err: toml::de::Error) -> Self {
        NrptiError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv parse errors
impl From<csv::Error> for NrptiError {
    fn from(err: csv::Error) -> Self {
        NrptiError::Csv(err.to_string())
    }
}

// Conversion from MongoDB driver errors
impl From<mongodb::error::Error> for NrptiError {
    fn from(err: mongodb::error::Error) -> Self {
        NrptiError::Database(err.to_string())
    }
}

// Conversion from BSON serialization errors
impl From<mongodb::bson::ser::Error> for NrptiError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        NrptiError::Serialization(err.to_string())
    }
}

// Conversion from BSON deserialization errors
impl From<mongodb::bson::de::Error> for NrptiError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        NrptiError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NrptiError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_unsupported_record_type_display() {
        let err = NrptiError::UnsupportedRecordType {
            record_type: "Certificate".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported record type: Certificate");
    }

    #[test]
    fn test_persistence_helper() {
        let err = NrptiError::persistence("bcogc:1234", "write timed out");
        assert!(matches!(err, NrptiError::PersistenceFailed { .. }));
        assert!(err.to_string().contains("bcogc:1234"));
    }

    #[test]
    fn test_view_rebuild_helper() {
        let err = NrptiError::view_rebuild("location", "aggregation failed");
        assert_eq!(
            err.to_string(),
            "Failed to rebuild view subset 'location': aggregation failed"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: NrptiError = io_err.into();
        assert!(matches!(err, NrptiError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: NrptiError = json_err.into();
        assert!(matches!(err, NrptiError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: NrptiError = toml_err.into();
        assert!(matches!(err, NrptiError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = NrptiError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
