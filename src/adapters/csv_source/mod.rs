//! CSV source adapter
//!
//! File-based sources (BCOGC, CORS, ERA) deliver rows as header-keyed
//! string maps. Values are untyped strings; date and number parsing is
//! the extractors' job.

pub mod reader;

pub use reader::{read_rows, CsvRow};
