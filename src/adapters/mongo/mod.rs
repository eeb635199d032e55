//! MongoDB adapter
//!
//! Connection management plus the [`RecordStore`](crate::adapters::store::RecordStore)
//! implementation over the canonical `nrpti` collection and the
//! materialized-view subset collections.

pub mod client;
pub mod store;

pub use client::MongoStoreClient;
pub use store::MongoRecordStore;
