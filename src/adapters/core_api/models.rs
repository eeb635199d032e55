//! CORE API response models
//!
//! The record payloads themselves stay as raw JSON values: their shape
//! varies by record type and the per-field extraction rules live in
//! [`core::extract::core_mines`](crate::core::extract::core_mines).

use serde::Deserialize;
use serde_json::Value;

/// One page of a record search response
#[derive(Debug, Deserialize)]
pub struct RecordPage {
    /// Raw record payloads on this page
    #[serde(default)]
    pub records: Vec<Value>,

    /// 1-based index of this page
    #[serde(default = "default_page")]
    pub current_page: u64,

    /// Total number of pages available
    #[serde(default = "default_page")]
    pub total_pages: u64,
}

fn default_page() -> u64 {
    1
}
