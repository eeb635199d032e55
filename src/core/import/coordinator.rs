//! Import coordination
//!
//! Drives one import run: fetch raw rows from a source, pass each
//! through the source's extractors and the record builder, persist the
//! result, and finally rebuild the materialized views. Per-record
//! failures are logged and collected; the batch always runs to
//! completion.

use super::summary::ImportSummary;
use crate::adapters::core_api::CoreApiClient;
use crate::adapters::csv_source::{self, CsvRow};
use crate::adapters::store::RecordStore;
use crate::core::build::{self, ImportDefaults, RecordSeed};
use crate::core::extract::{bcogc, core_mines, cors, era};
use crate::domain::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// The data sources the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// BC Oil and Gas Commission enforcement orders (CSV)
    Bcogc,
    /// Conservation Officer Service tickets (CSV)
    Cors,
    /// Environmental administrative penalties (CSV)
    Era,
    /// CORE mines records (authenticated API)
    Core,
}

impl SourceKind {
    /// Stable name used in logs and summaries
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Bcogc => "bcogc",
            SourceKind::Cors => "cors",
            SourceKind::Era => "era",
            SourceKind::Core => "core",
        }
    }

    /// Whether the source is file-based
    pub fn is_csv(&self) -> bool {
        !matches!(self, SourceKind::Core)
    }

    fn csv_seed(&self, row: &CsvRow) -> RecordSeed {
        match self {
            SourceKind::Bcogc => bcogc::seed(row),
            SourceKind::Cors => cors::seed(row),
            SourceKind::Era => era::seed(row),
            // CORE is not file-based; is_csv gates this path
            SourceKind::Core => RecordSeed::default(),
        }
    }
}

/// Coordinates import runs against a canonical record store
pub struct ImportCoordinator {
    store: Arc<dyn RecordStore>,
    defaults: ImportDefaults,
    shutdown: Option<tokio::sync::watch::Receiver<bool>>,
}

impl ImportCoordinator {
    /// Creates a coordinator over a record store
    pub fn new(store: Arc<dyn RecordStore>, defaults: ImportDefaults) -> Self {
        Self {
            store,
            defaults,
            shutdown: None,
        }
    }

    /// Attaches a shutdown signal checked between records
    ///
    /// When the signal fires, the in-flight record completes, the rest of
    /// the batch is skipped, and the summary is marked interrupted.
    pub fn with_shutdown(mut self, shutdown: tokio::sync::watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|signal| *signal.borrow())
            .unwrap_or(false)
    }

    /// Imports a CSV source file
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::Csv` when the file itself cannot be read.
    /// Per-row failures are collected in the summary instead.
    pub async fn import_csv(&self, kind: SourceKind, path: impl AsRef<Path>) -> Result<ImportSummary> {
        let started = Instant::now();
        let rows = csv_source::read_rows(path)?;

        tracing::info!(
            source = kind.name(),
            rows = rows.len(),
            "Starting CSV import"
        );

        let seeds = rows.iter().map(|row| kind.csv_seed(row)).collect();
        let mut summary = self.persist_seeds(kind.name(), seeds).await;
        summary.duration = started.elapsed();
        summary.log();
        Ok(summary)
    }

    /// Imports every record from the CORE API
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::AuthenticationFailed` or
    /// `NrptiError::SourceFetch` when the fetch itself fails. Per-payload
    /// failures are collected in the summary instead.
    pub async fn import_core(&self, client: &CoreApiClient) -> Result<ImportSummary> {
        let started = Instant::now();
        let payloads = client.fetch_records().await?;

        tracing::info!(
            source = SourceKind::Core.name(),
            payloads = payloads.len(),
            "Starting CORE import"
        );

        let seeds = payloads.iter().map(core_mines::seed).collect();
        let mut summary = self.persist_seeds(SourceKind::Core.name(), seeds).await;
        summary.duration = started.elapsed();
        summary.log();
        Ok(summary)
    }

    /// Builds and persists a batch of seeds
    ///
    /// Re-imported records keep their identity: when a record with the
    /// same source reference already exists, the new document takes over
    /// its id, creation audit fields, and source creation date, so a
    /// re-run updates in place instead of duplicating.
    pub async fn persist_seeds(&self, source: &str, seeds: Vec<RecordSeed>) -> ImportSummary {
        let mut summary = ImportSummary::new(source);
        summary.total = seeds.len();

        for (position, seed) in seeds.into_iter().enumerate() {
            if self.shutdown_requested() {
                summary.interrupted = true;
                break;
            }

            let fallback_ref = format!("{source}:row-{position}");
            let seed_ref = match &seed.source_ref_id {
                Some(ref_id) => format!("{}:{}", seed.source_system_ref, ref_id),
                None => fallback_ref,
            };

            let mut record = match build::build_record(seed, &self.defaults) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(source_ref = %seed_ref, error = %e, "Failed to build record");
                    summary.record_failure(seed_ref, e.to_string());
                    continue;
                }
            };

            let existing = match record.source_ref_id.as_deref() {
                Some(ref_id) => {
                    match self
                        .store
                        .find_by_source_ref(&record.source_system_ref, ref_id)
                        .await
                    {
                        Ok(existing) => existing,
                        Err(e) => {
                            tracing::warn!(source_ref = %seed_ref, error = %e, "Lookup failed");
                            summary.record_failure(seed_ref, e.to_string());
                            continue;
                        }
                    }
                }
                None => None,
            };

            let is_update = existing.is_some();
            if let Some(existing) = existing {
                record.id = existing.id;
                record.date_added = existing.date_added;
                record.added_by = existing.added_by;
                if record.source_date_added.is_none() {
                    record.source_date_added = existing.source_date_added;
                }
            }

            match self.store.upsert(&record).await {
                Ok(()) => {
                    if is_update {
                        summary.updated += 1;
                    } else {
                        summary.created += 1;
                    }
                    tracing::debug!(
                        source_ref = %record.source_ref(),
                        schema = %record.schema_name,
                        updated = is_update,
                        "Persisted record"
                    );
                }
                Err(e) => {
                    tracing::warn!(source_ref = %seed_ref, error = %e, "Persistence failed");
                    summary.record_failure(seed_ref, e.to_string());
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryRecordStore;
    use crate::core::extract::era;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn coordinator() -> (Arc<InMemoryRecordStore>, ImportCoordinator) {
        let store = Arc::new(InMemoryRecordStore::new());
        let coordinator = ImportCoordinator::new(store.clone(), ImportDefaults::default());
        (store, coordinator)
    }

    #[tokio::test]
    async fn test_import_csv_bcogc() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "operator,order_number,title,regulation,issued_date").unwrap();
        writeln!(
            file,
            "Coastal GasLink Pipeline Ltd.,2023-016,General Order 2023-016,EPMR,01/15/2023"
        )
        .unwrap();
        file.flush().unwrap();

        let (store, coordinator) = coordinator();
        let summary = coordinator
            .import_csv(SourceKind::Bcogc, file.path())
            .await
            .unwrap();

        assert_eq!(summary.total, 1);
        assert_eq!(summary.created, 1);
        assert!(!summary.has_failures());

        let record = store
            .find_by_source_ref("bcogc-csv", "2023-016")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.project_name.as_deref(), Some("Coastal Gaslink"));
        assert_eq!(
            record.epic_project_id.as_deref(),
            Some("588511c4aaecd9001b825604")
        );
    }

    #[tokio::test]
    async fn test_reimport_updates_in_place() {
        let (store, coordinator) = coordinator();

        let seed = || {
            let row = CsvRow::from([
                ("case_number", "ERA-2023-044"),
                ("client_type_code", "C"),
                ("client_name", "Northwood Pulp Ltd."),
                ("penalty_amount", "40000"),
                ("contravention", "Unauthorized discharge of waste"),
            ]);
            vec![era::seed(&row)]
        };

        let first = coordinator.persist_seeds("era", seed()).await;
        assert_eq!((first.created, first.updated), (1, 0));
        let original = store
            .find_by_source_ref("era-csv", "ERA-2023-044")
            .await
            .unwrap()
            .unwrap();

        let second = coordinator.persist_seeds("era", seed()).await;
        assert_eq!((second.created, second.updated), (0, 1));
        assert_eq!(store.record_count().await, 1);

        let updated = store
            .find_by_source_ref("era-csv", "ERA-2023-044")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date_added, original.date_added);
    }

    #[tokio::test]
    async fn test_unknown_type_collected_not_fatal() {
        let (store, coordinator) = coordinator();

        let mut bad = RecordSeed::new("Certificate", "core");
        bad.source_ref_id = Some("901".to_string());
        let good = {
            let payload = serde_json::json!({
                "record_id": "902",
                "type_code": "ORD",
                "record_name": "Order 902"
            });
            crate::core::extract::core_mines::seed(&payload)
        };

        let summary = coordinator.persist_seeds("core", vec![bad, good]).await;
        assert_eq!(summary.total, 2);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.errors[0].source_ref, "core:901");
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_persistence_failure_does_not_block_batch() {
        use crate::adapters::store::failing::FailingRecordStore;

        let store = Arc::new(FailingRecordStore::new().failing_upsert("ERA-1"));
        let coordinator = ImportCoordinator::new(store.clone(), ImportDefaults::default());

        let rejected = era::seed(&CsvRow::from([
            ("case_number", "ERA-1"),
            ("client_type_code", "C"),
            ("client_name", "Acme Ltd."),
        ]));
        let accepted = era::seed(&CsvRow::from([
            ("case_number", "ERA-2"),
            ("client_name", "Jane Doe"),
        ]));

        let summary = coordinator
            .persist_seeds("era", vec![rejected, accepted])
            .await;

        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.errors[0].source_ref, "era-csv:ERA-1");

        // The record after the failed one still persisted.
        let survivor = store.find_by_source_ref("era-csv", "ERA-2").await.unwrap();
        assert!(survivor.is_some());
        assert!(store
            .find_by_source_ref("era-csv", "ERA-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_batch() {
        let store = Arc::new(InMemoryRecordStore::new());
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(true);
        let coordinator = ImportCoordinator::new(store.clone(), ImportDefaults::default())
            .with_shutdown(shutdown_rx);

        let seeds = vec![
            RecordSeed::new("Order", "bcogc-csv"),
            RecordSeed::new("Order", "bcogc-csv"),
        ];
        let summary = coordinator.persist_seeds("bcogc", seeds).await;

        assert!(summary.interrupted);
        assert_eq!(summary.created, 0);
        assert_eq!(store.record_count().await, 0);
        drop(shutdown_tx);
    }

    #[tokio::test]
    async fn test_missing_csv_file_is_fatal() {
        let (_, coordinator) = coordinator();
        let result = coordinator
            .import_csv(SourceKind::Era, "no-such-file.csv")
            .await;
        assert!(result.is_err());
    }
}
