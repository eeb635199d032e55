//! Domain models and types for the ingestion pipeline.
//!
//! This module contains the core domain models, types and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The canonical record model** ([`Record`], [`RecordBuilder`]) and its
//!   sub-objects ([`Entity`], [`Legislation`], [`Penalty`])
//! - **Error types** ([`NrptiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, NrptiError>`]:
//!
//! ```rust
//! use nrpti::domain::{NrptiError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(NrptiError::Validation("Invalid input".to_string()))
//! }
//! ```
//!
//! # Builder Pattern
//!
//! Canonical records use the builder pattern so every field is populated
//! (defaulted when unresolvable) before persistence:
//!
//! ```rust
//! use nrpti::domain::{Entity, Record};
//!
//! let record = Record::builder("Order", "bcogc-csv")
//!     .record_name(Some("General Order 2023-01".to_string()))
//!     .issued_to(Some(Entity::company("Coastal GasLink Pipeline Ltd.")))
//!     .build();
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::NrptiError;
pub use record::{Entity, EntityType, Legislation, Penalty, PenaltyAmount, Record, RecordBuilder};
pub use result::Result;
