//! Materialized view rebuilding
//!
//! Rebuilds each subset collection wholesale from the canonical
//! collection. Wholesale replacement keeps the updater idempotent and
//! free of per-document diffing: two runs over an unchanged canonical
//! collection produce identical subset contents.

use super::subsets::{self, ViewSubset, SUBSETS};
use crate::adapters::store::RecordStore;
use crate::domain::{NrptiError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of rebuilding one subset
#[derive(Debug)]
pub struct SubsetOutcome {
    /// Subset name
    pub subset: &'static str,

    /// Documents written, when the rebuild succeeded
    pub documents: usize,

    /// Failure message, when it did not
    pub error: Option<String>,
}

/// Aggregate outcome of a full rebuild
#[derive(Debug, Default)]
pub struct RebuildReport {
    /// Per-subset outcomes, in rebuild order
    pub outcomes: Vec<SubsetOutcome>,
}

impl RebuildReport {
    /// Number of subsets that rebuilt cleanly
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    /// Number of subsets that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Rebuilds materialized view subsets from a canonical record store
///
/// One updater guards one store: concurrent rebuild attempts against the
/// same updater are rejected rather than queued, since the second run
/// would only redo the first run's work.
pub struct ViewUpdater {
    store: Arc<dyn RecordStore>,
    rebuild_guard: Mutex<()>,
}

impl ViewUpdater {
    /// Creates an updater over a record store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            rebuild_guard: Mutex::new(()),
        }
    }

    /// Rebuilds every subset
    ///
    /// Subset failures do not abort the run: each remaining subset still
    /// rebuilds, and the report carries the per-subset outcomes.
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::ViewRebuildInProgress` when another rebuild
    /// on this updater is still running.
    pub async fn rebuild_all(&self) -> Result<RebuildReport> {
        let _guard = self
            .rebuild_guard
            .try_lock()
            .map_err(|_| NrptiError::ViewRebuildInProgress)?;

        let mut report = RebuildReport::default();
        for subset in SUBSETS {
            let outcome = match self.rebuild(subset).await {
                Ok(documents) => {
                    tracing::info!(
                        subset = subset.name,
                        documents = documents,
                        "Rebuilt materialized view subset"
                    );
                    SubsetOutcome {
                        subset: subset.name,
                        documents,
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::error!(
                        subset = subset.name,
                        error = %e,
                        "Failed to rebuild materialized view subset"
                    );
                    SubsetOutcome {
                        subset: subset.name,
                        documents: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Rebuilds a single subset by name
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::ViewRebuildInProgress` when a full rebuild is
    /// running, `NrptiError::Validation` for an unknown subset name, or
    /// `NrptiError::ViewRebuildFailed` when the rebuild itself fails.
    pub async fn rebuild_one(&self, name: &str) -> Result<usize> {
        let _guard = self
            .rebuild_guard
            .try_lock()
            .map_err(|_| NrptiError::ViewRebuildInProgress)?;

        let subset = subsets::find(name)
            .ok_or_else(|| NrptiError::Validation(format!("Unknown view subset '{name}'")))?;
        self.rebuild(subset).await
    }

    async fn rebuild(&self, subset: &ViewSubset) -> Result<usize> {
        let records = self
            .store
            .list_for_schemas(subset.schemas)
            .await
            .map_err(|e| NrptiError::view_rebuild(subset.name, e.to_string()))?;

        let documents: Vec<_> = records
            .iter()
            .filter(|record| subset.includes(record))
            .map(|record| subset.project(record))
            .collect();

        let count = documents.len();
        self.store
            .replace_view(subset.collection, documents)
            .await
            .map_err(|e| NrptiError::view_rebuild(subset.name, e.to_string()))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryRecordStore;
    use crate::domain::Record;

    async fn seeded_store() -> Arc<InMemoryRecordStore> {
        let store = Arc::new(InMemoryRecordStore::new());
        store
            .upsert(
                &Record::builder("Order", "bcogc-csv")
                    .record_name(Some("General Order 2023-016".to_string()))
                    .build(),
            )
            .await
            .unwrap();
        store
            .upsert(&Record::builder("Ticket", "cors-csv").build())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_rebuild_all_populates_every_subset() {
        let store = seeded_store().await;
        let updater = ViewUpdater::new(store.clone());

        let report = updater.rebuild_all().await.unwrap();
        assert_eq!(report.outcomes.len(), SUBSETS.len());
        assert_eq!(report.failed(), 0);

        // Order participates in location; Ticket does not.
        let location = store.read_view("location_subset").await.unwrap();
        assert_eq!(location.len(), 1);
        assert_eq!(location[0].get_str("_schemaName").unwrap(), "Order");

        // Both participate in issuer.
        let issuer = store.read_view("issuer_subset").await.unwrap();
        assert_eq!(issuer.len(), 2);
    }

    #[tokio::test]
    async fn test_rebuild_is_idempotent() {
        let store = seeded_store().await;
        let updater = ViewUpdater::new(store.clone());

        updater.rebuild_all().await.unwrap();
        let first = store.read_view("record_name_subset").await.unwrap();

        updater.rebuild_all().await.unwrap();
        let second = store.read_view("record_name_subset").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rebuild_one_by_name() {
        let store = seeded_store().await;
        let updater = ViewUpdater::new(store.clone());

        let count = updater.rebuild_one("issuer").await.unwrap();
        assert_eq!(count, 2);

        let err = updater.rebuild_one("bogus").await.unwrap_err();
        assert!(matches!(err, NrptiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_subset_does_not_abort_the_rest() {
        use crate::adapters::store::failing::FailingRecordStore;

        let store = Arc::new(FailingRecordStore::new().failing_view("issuer_subset"));
        store
            .upsert(&Record::builder("Order", "bcogc-csv").build())
            .await
            .unwrap();

        let updater = ViewUpdater::new(store.clone());
        let report = updater.rebuild_all().await.unwrap();

        assert_eq!(report.outcomes.len(), SUBSETS.len());
        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), SUBSETS.len() - 1);

        let failed = report.outcomes.iter().find(|o| o.error.is_some()).unwrap();
        assert_eq!(failed.subset, "issuer");
        assert_eq!(failed.documents, 0);

        // The subsets after the failed one still rebuilt.
        let location = store.read_view("location_subset").await.unwrap();
        assert_eq!(location.len(), 1);
        let record_name = store.read_view("record_name_subset").await.unwrap();
        assert_eq!(record_name.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_rebuild_rejected() {
        let store = seeded_store().await;
        let updater = ViewUpdater::new(store);

        let guard = updater.rebuild_guard.try_lock().unwrap();
        let err = updater.rebuild_all().await.unwrap_err();
        assert!(matches!(err, NrptiError::ViewRebuildInProgress));
        drop(guard);

        assert!(updater.rebuild_all().await.is_ok());
    }
}
