//! MongoDB implementation of the canonical record store
//!
//! Canonical records live in a single polymorphic collection keyed by
//! `_id` and discriminated by `_schemaName`. View subsets are separate
//! collections replaced wholesale via a staging collection and an atomic
//! `renameCollection` swap, so readers never observe a half-replaced
//! view.

use super::MongoStoreClient;
use crate::adapters::store::RecordStore;
use crate::domain::{NrptiError, Record, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, to_document, Document};
use mongodb::options::ReplaceOptions;
use mongodb::Collection;

/// [`RecordStore`] backed by MongoDB
pub struct MongoRecordStore {
    client: MongoStoreClient,
    canonical_collection: String,
}

impl MongoRecordStore {
    /// Creates a store over the given canonical collection
    pub fn new(client: MongoStoreClient, canonical_collection: impl Into<String>) -> Self {
        Self {
            client,
            canonical_collection: canonical_collection.into(),
        }
    }

    fn canonical(&self) -> Collection<Document> {
        self.client
            .database()
            .collection::<Document>(&self.canonical_collection)
    }

    fn staging_name(view_name: &str) -> String {
        format!("{view_name}__staging")
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Record>> {
        let document = self.canonical().find_one(doc! { "_id": id }, None).await?;

        match document {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn find_by_source_ref(
        &self,
        source_system_ref: &str,
        source_ref_id: &str,
    ) -> Result<Option<Record>> {
        let filter = doc! {
            "sourceSystemRef": source_system_ref,
            "_sourceRefId": source_ref_id,
        };
        let document = self.canonical().find_one(filter, None).await?;

        match document {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, record: &Record) -> Result<()> {
        let document = to_document(record)?;
        let options = ReplaceOptions::builder().upsert(true).build();

        self.canonical()
            .replace_one(doc! { "_id": &record.id }, document, options)
            .await
            .map_err(|e| NrptiError::persistence(record.source_ref(), e.to_string()))?;

        tracing::debug!(
            record_id = %record.id,
            schema_name = %record.schema_name,
            source_ref = %record.source_ref(),
            "Upserted canonical record"
        );

        Ok(())
    }

    async fn list_for_schemas(&self, schema_names: &[&str]) -> Result<Vec<Record>> {
        let pipeline = vec![
            doc! {
                "$match": {
                    "_schemaName": { "$in": schema_names.to_vec() },
                    "isDeleted": false,
                }
            },
            // Stable order so repeated listings compare equal
            doc! { "$sort": { "_id": 1 } },
        ];

        let mut cursor = self.canonical().aggregate(pipeline, None).await?;
        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            records.push(from_document(document)?);
        }

        Ok(records)
    }

    async fn replace_view(&self, view_name: &str, documents: Vec<Document>) -> Result<()> {
        let database = self.client.database();
        let staging_name = Self::staging_name(view_name);
        let staging = database.collection::<Document>(&staging_name);

        // Leftover staging data from an interrupted rebuild must not leak
        // into this one.
        staging
            .drop(None)
            .await
            .map_err(|e| NrptiError::view_rebuild(view_name, e.to_string()))?;
        database
            .create_collection(&staging_name, None)
            .await
            .map_err(|e| NrptiError::view_rebuild(view_name, e.to_string()))?;

        let document_count = documents.len();
        if !documents.is_empty() {
            staging
                .insert_many(documents, None)
                .await
                .map_err(|e| NrptiError::view_rebuild(view_name, e.to_string()))?;
        }

        // renameCollection is an atomic namespace swap; readers see either
        // the old contents or the new, never a mixture.
        let database_name = database.name();
        self.client
            .client()
            .database("admin")
            .run_command(
                doc! {
                    "renameCollection": format!("{database_name}.{staging_name}"),
                    "to": format!("{database_name}.{view_name}"),
                    "dropTarget": true,
                },
                None,
            )
            .await
            .map_err(|e| NrptiError::view_rebuild(view_name, e.to_string()))?;

        tracing::info!(
            view = view_name,
            documents = document_count,
            "Replaced materialized view collection"
        );

        Ok(())
    }

    async fn read_view(&self, view_name: &str) -> Result<Vec<Document>> {
        let collection = self.client.database().collection::<Document>(view_name);
        let mut cursor = collection.find(None, None).await?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            documents.push(document);
        }

        Ok(documents)
    }
}
