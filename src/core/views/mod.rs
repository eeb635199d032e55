//! Materialized search views
//!
//! Derived, denormalized subset collections recomputed wholesale from
//! the canonical collection after each import batch.

pub mod subsets;
pub mod updater;

pub use subsets::{ViewSubset, SUBSETS};
pub use updater::{RebuildReport, SubsetOutcome, ViewUpdater};
