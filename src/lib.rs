// NRPTI - Natural Resources Public Transparency Importer
// Copyright (c) 2025 NRPTI Contributors
// Licensed under the MIT License

//! # NRPTI - Natural Resources Public Transparency Importer
//!
//! NRPTI is an ingestion and normalization pipeline built in Rust that imports
//! natural-resource compliance records (orders, inspections, penalties, tickets)
//! from provincial data sources into a single canonical MongoDB collection, and
//! maintains the denormalized search views derived from it.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** raw rows from CSV exports (BCOGC, CORS, ERA) and the
//!   authenticated CORE mines API
//! - **Normalizing** source fields through per-source extraction rules
//! - **Building** canonical records discriminated by schema name
//! - **Rebuilding** the materialized search view subsets after each batch
//!
//! ## Architecture
//!
//! NRPTI follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline logic (extract, types, build, import, views)
//! - [`adapters`] - External integrations (MongoDB, CORE API, CSV files)
//! - [`domain`] - Canonical record model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nrpti::adapters::store::InMemoryRecordStore;
//! use nrpti::core::build::ImportDefaults;
//! use nrpti::core::import::{ImportCoordinator, SourceKind};
//! use nrpti::core::views::ViewUpdater;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryRecordStore::new());
//!
//!     // Import a source file
//!     let coordinator = ImportCoordinator::new(store.clone(), ImportDefaults::default());
//!     let summary = coordinator
//!         .import_csv(SourceKind::Bcogc, "bcogc_orders.csv")
//!         .await?;
//!     println!("Imported {} records", summary.created + summary.updated);
//!
//!     // Rebuild the search views
//!     let updater = ViewUpdater::new(store);
//!     let report = updater.rebuild_all().await?;
//!     println!("Rebuilt {} view subsets", report.succeeded());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Idempotent Imports
//!
//! Records carry their source identity (`sourceSystemRef` + `_sourceRefId`).
//! Re-importing a source updates existing records in place, preserving their
//! internal id and creation audit fields, so scheduled runs never duplicate.
//!
//! ### Per-Source Extraction Rules
//!
//! Each source module in [`core::extract`] is a set of pure rule-table
//! lookups, unit-testable with literal inputs:
//!
//! ```rust
//! use nrpti::adapters::csv_source::CsvRow;
//! use nrpti::core::extract::cors;
//!
//! let row = CsvRow::from([("case_number", "P-2023-100")]);
//! assert_eq!(cors::issuing_agency(&row).as_deref(), Some("BC Parks"));
//! ```
//!
//! ## Error Handling
//!
//! NRPTI uses the [`domain::NrptiError`] type for all errors:
//!
//! ```rust,no_run
//! use nrpti::domain::NrptiError;
//!
//! fn example() -> Result<(), NrptiError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = nrpti::config::load_config("nrpti.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! NRPTI uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting import");
//! warn!(source_ref = "cors-csv:P-2023-100", "Record import failed");
//! error!(error = "connection refused", "Import aborted");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
