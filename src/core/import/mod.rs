//! Import orchestration
//!
//! The per-run pipeline: source fetch, extraction, building,
//! persistence, and the run summary.

pub mod coordinator;
pub mod summary;

pub use coordinator::{ImportCoordinator, SourceKind};
pub use summary::{ImportError, ImportSummary};
