//! Import run summary

use std::time::Duration;

/// One failed row or payload from an import run
#[derive(Debug, Clone)]
pub struct ImportError {
    /// Stable reference to the failed record (`sourceSystemRef:refId`
    /// when known, otherwise a row/payload position)
    pub source_ref: String,

    /// What went wrong
    pub message: String,
}

/// Outcome of one import run against one source
///
/// Per-record failures are collected, not fatal: one malformed row must
/// never abort the rest of the batch.
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Source the run ingested from
    pub source: String,

    /// Rows/payloads read from the source
    pub total: usize,

    /// Records created in the canonical collection
    pub created: usize,

    /// Existing records updated
    pub updated: usize,

    /// Per-record failures
    pub errors: Vec<ImportError>,

    /// Whether a shutdown signal cut the run short
    pub interrupted: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl ImportSummary {
    /// Creates an empty summary for a source
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Number of failed records
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Whether any record failed
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Records a per-record failure
    pub fn record_failure(&mut self, source_ref: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ImportError {
            source_ref: source_ref.into(),
            message: message.into(),
        });
    }

    /// Logs the run outcome at a level matching its health
    pub fn log(&self) {
        if self.interrupted {
            tracing::warn!(
                source = %self.source,
                total = self.total,
                created = self.created,
                updated = self.updated,
                "Import interrupted by shutdown signal"
            );
        }
        if self.has_failures() {
            tracing::warn!(
                source = %self.source,
                total = self.total,
                created = self.created,
                updated = self.updated,
                failed = self.failed(),
                duration_ms = self.duration.as_millis() as u64,
                "Import completed with failures"
            );
            for error in &self.errors {
                tracing::warn!(
                    source_ref = %error.source_ref,
                    error = %error.message,
                    "Record import failed"
                );
            }
        } else {
            tracing::info!(
                source = %self.source,
                total = self.total,
                created = self.created,
                updated = self.updated,
                duration_ms = self.duration.as_millis() as u64,
                "Import completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = ImportSummary::new("bcogc");
        summary.total = 3;
        summary.created = 2;
        summary.record_failure("bcogc-csv:2023-099", "unparseable row");

        assert_eq!(summary.failed(), 1);
        assert!(summary.has_failures());
        assert_eq!(summary.errors[0].source_ref, "bcogc-csv:2023-099");
    }

    #[test]
    fn test_clean_summary() {
        let summary = ImportSummary::new("core");
        assert!(!summary.has_failures());
        assert_eq!(summary.failed(), 0);
    }
}
