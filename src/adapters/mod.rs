//! External integrations
//!
//! Adapters isolate third-party services behind domain-typed interfaces:
//! the canonical MongoDB store, the authenticated CORE API, and CSV
//! source files.

pub mod core_api;
pub mod csv_source;
pub mod mongo;
pub mod store;
