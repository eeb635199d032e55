//! Canonical store abstraction
//!
//! This module defines the trait that storage backends must implement to
//! serve the ingestion pipeline: the canonical record collection plus the
//! materialized-view subset collections derived from it.

#[cfg(test)]
pub(crate) mod failing;
pub mod memory;

pub use memory::InMemoryRecordStore;

use crate::domain::{Record, Result};
use async_trait::async_trait;
use mongodb::bson::Document;

/// Storage backend for the canonical collection and its view subsets
///
/// Two implementations exist: the MongoDB adapter used in normal runs,
/// and an in-memory store used for dry-run mode and tests. The
/// materialized views are fully derived — nothing outside
/// [`replace_view`](RecordStore::replace_view) ever writes to them.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Test the backend connection
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    async fn test_connection(&self) -> Result<()>;

    /// Fetch a canonical record by its internal id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails for reasons other than
    /// "not found".
    async fn get_by_id(&self, id: &str) -> Result<Option<Record>>;

    /// Fetch a canonical record by its source identity
    ///
    /// The pair (`source_system_ref`, `source_ref_id`) is the natural key
    /// importers use to detect whether a source row has been seen before.
    async fn find_by_source_ref(
        &self,
        source_system_ref: &str,
        source_ref_id: &str,
    ) -> Result<Option<Record>>;

    /// Insert or fully replace a canonical record by its internal id
    ///
    /// # Errors
    ///
    /// Returns `NrptiError::PersistenceFailed` carrying the record's
    /// source reference when the write fails.
    async fn upsert(&self, record: &Record) -> Result<()>;

    /// List non-deleted canonical records whose schema name is in the
    /// given allow-list
    ///
    /// Soft-deleted records are excluded: the views built from this
    /// listing serve search, while the canonical collection retains the
    /// deleted documents for audit.
    async fn list_for_schemas(&self, schema_names: &[&str]) -> Result<Vec<Record>>;

    /// Atomically replace the full contents of a view subset collection
    ///
    /// After this call, readers of `view_name` observe exactly
    /// `documents` — never a mix of old and new contents.
    async fn replace_view(&self, view_name: &str, documents: Vec<Document>) -> Result<()>;

    /// Read the full contents of a view subset collection
    async fn read_view(&self, view_name: &str) -> Result<Vec<Document>>;
}
