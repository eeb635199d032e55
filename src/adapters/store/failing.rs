//! Record store test double with injectable write failures
//!
//! Wraps the in-memory store and rejects selected writes, so tests can
//! exercise the pipeline's failure-isolation paths. Everything else
//! passes through to the inner store.

use super::{InMemoryRecordStore, RecordStore};
use crate::domain::{NrptiError, Record, Result};
use async_trait::async_trait;
use mongodb::bson::Document;

/// [`RecordStore`] that fails writes on command
#[derive(Default)]
pub(crate) struct FailingRecordStore {
    inner: InMemoryRecordStore,
    failing_view: Option<String>,
    failing_source_ref: Option<String>,
}

impl FailingRecordStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rejects `replace_view` calls targeting the named collection
    pub(crate) fn failing_view(mut self, collection: impl Into<String>) -> Self {
        self.failing_view = Some(collection.into());
        self
    }

    /// Rejects `upsert` calls for records with the given source ref id
    pub(crate) fn failing_upsert(mut self, source_ref_id: impl Into<String>) -> Self {
        self.failing_source_ref = Some(source_ref_id.into());
        self
    }
}

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn test_connection(&self) -> Result<()> {
        self.inner.test_connection().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Record>> {
        self.inner.get_by_id(id).await
    }

    async fn find_by_source_ref(
        &self,
        source_system_ref: &str,
        source_ref_id: &str,
    ) -> Result<Option<Record>> {
        self.inner
            .find_by_source_ref(source_system_ref, source_ref_id)
            .await
    }

    async fn upsert(&self, record: &Record) -> Result<()> {
        if self.failing_source_ref.is_some()
            && self.failing_source_ref.as_deref() == record.source_ref_id.as_deref()
        {
            return Err(NrptiError::persistence(
                record.source_ref(),
                "write rejected",
            ));
        }
        self.inner.upsert(record).await
    }

    async fn list_for_schemas(&self, schema_names: &[&str]) -> Result<Vec<Record>> {
        self.inner.list_for_schemas(schema_names).await
    }

    async fn replace_view(&self, view_name: &str, documents: Vec<Document>) -> Result<()> {
        if self.failing_view.as_deref() == Some(view_name) {
            return Err(NrptiError::view_rebuild(view_name, "write rejected"));
        }
        self.inner.replace_view(view_name, documents).await
    }

    async fn read_view(&self, view_name: &str) -> Result<Vec<Document>> {
        self.inner.read_view(view_name).await
    }
}
