//! Core pipeline logic for NRPTI.
//!
//! This module contains the ingestion and normalization pipeline that
//! turns raw source data into canonical records and derived search
//! views.
//!
//! # Modules
//!
//! - [`extract`] - Per-source field extraction rules
//! - [`types`] - Record type resolution table
//! - [`build`] - Record building from extracted field values
//! - [`import`] - Import orchestration and run summaries
//! - [`views`] - Materialized search view rebuilding
//!
//! # Import Workflow
//!
//! The typical import workflow:
//!
//! 1. **Fetch**: Read rows from a CSV export or page through the CORE API
//! 2. **Extract**: Normalize each raw row's fields via the source's extractors
//! 3. **Build**: Resolve the record type and compose the canonical record
//! 4. **Persist**: Upsert into the canonical collection, preserving identity
//!    of previously imported records
//! 5. **Rebuild Views**: Recompute the materialized search subsets
//! 6. **Report**: Log the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nrpti::adapters::store::InMemoryRecordStore;
//! use nrpti::core::build::ImportDefaults;
//! use nrpti::core::import::{ImportCoordinator, SourceKind};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryRecordStore::new());
//! let coordinator = ImportCoordinator::new(store, ImportDefaults::default());
//!
//! let summary = coordinator
//!     .import_csv(SourceKind::Bcogc, "bcogc_orders.csv")
//!     .await?;
//!
//! println!("Created: {}", summary.created);
//! println!("Updated: {}", summary.updated);
//! println!("Failed: {}", summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod extract;
pub mod import;
pub mod types;
pub mod views;
