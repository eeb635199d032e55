//! In-memory record store
//!
//! Backs dry-run imports and tests. Mirrors the MongoDB adapter's
//! semantics: upsert by internal id, natural-key lookup by source
//! reference, full-replace view collections.

use super::RecordStore;
use crate::domain::{Record, Result};
use async_trait::async_trait;
use mongodb::bson::Document;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of [`RecordStore`]
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<String, Record>>,
    views: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of canonical records currently held
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Record>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_source_ref(
        &self,
        source_system_ref: &str,
        source_ref_id: &str,
    ) -> Result<Option<Record>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| {
                r.source_system_ref == source_system_ref
                    && r.source_ref_id.as_deref() == Some(source_ref_id)
            })
            .cloned())
    }

    async fn upsert(&self, record: &Record) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn list_for_schemas(&self, schema_names: &[&str]) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| !r.is_deleted && schema_names.contains(&r.schema_name.as_str()))
            .cloned()
            .collect();
        // Stable output order so repeated listings compare equal
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    async fn replace_view(&self, view_name: &str, documents: Vec<Document>) -> Result<()> {
        self.views
            .write()
            .await
            .insert(view_name.to_string(), documents);
        Ok(())
    }

    async fn read_view(&self, view_name: &str) -> Result<Vec<Document>> {
        Ok(self
            .views
            .read()
            .await
            .get(view_name)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let store = InMemoryRecordStore::new();
        let record = Record::builder("Order", "bcogc-csv")
            .source_ref_id(Some("1234".to_string()))
            .build();

        store.upsert(&record).await.unwrap();

        let fetched = store.get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(fetched, record);

        let by_source = store
            .find_by_source_ref("bcogc-csv", "1234")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_source.id, record.id);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let store = InMemoryRecordStore::new();
        let mut record = Record::builder("Order", "bcogc-csv").build();
        store.upsert(&record).await.unwrap();

        record.record_name = Some("Updated".to_string());
        store.upsert(&record).await.unwrap();

        assert_eq!(store.record_count().await, 1);
        let fetched = store.get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(fetched.record_name.as_deref(), Some("Updated"));
    }

    #[tokio::test]
    async fn test_list_for_schemas_filters_deleted_and_schema() {
        let store = InMemoryRecordStore::new();

        let order = Record::builder("Order", "bcogc-csv").build();
        let ticket = Record::builder("Ticket", "cors-csv").build();
        let mut deleted = Record::builder("Order", "bcogc-csv").build();
        deleted.is_deleted = true;

        store.upsert(&order).await.unwrap();
        store.upsert(&ticket).await.unwrap();
        store.upsert(&deleted).await.unwrap();

        let listed = store.list_for_schemas(&["Order"]).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, order.id);
    }

    #[tokio::test]
    async fn test_replace_and_read_view() {
        let store = InMemoryRecordStore::new();

        store
            .replace_view("location", vec![doc! { "_id": "a" }])
            .await
            .unwrap();
        assert_eq!(store.read_view("location").await.unwrap().len(), 1);

        store
            .replace_view("location", vec![doc! { "_id": "b" }, doc! { "_id": "c" }])
            .await
            .unwrap();
        let docs = store.read_view("location").await.unwrap();
        assert_eq!(docs.len(), 2);

        assert!(store.read_view("missing").await.unwrap().is_empty());
    }
}
