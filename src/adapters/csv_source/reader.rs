//! CSV file reading
//!
//! Parses a source CSV file into [`CsvRow`] values: one map per data
//! row, keyed by the header row.

use crate::domain::Result;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

/// One raw row from a CSV source file
///
/// Keys are the file's column headers; values are the raw cell strings.
/// [`get`](CsvRow::get) applies the pipeline's missing-value convention:
/// whitespace-only and empty cells read as `None`, so extractors treat
/// "column absent" and "cell blank" identically.
#[derive(Debug, Clone, Default)]
pub struct CsvRow {
    values: HashMap<String, String>,
}

impl CsvRow {
    /// Creates a row from header/value pairs
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Returns the trimmed cell value, or `None` when the column is
    /// absent or the cell is blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

}

impl<const N: usize> From<[(&str, &str); N]> for CsvRow {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Reads all rows from a CSV file
///
/// The first row is treated as the header row. Rows with more or fewer
/// cells than the header are tolerated; surplus cells are dropped and
/// missing cells read as absent.
///
/// # Errors
///
/// Returns `NrptiError::Csv` if the file cannot be opened or a row
/// cannot be parsed.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<CsvRow>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let values = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(CsvRow::new(values));
    }

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        "Parsed CSV source file"
    );

    Ok(rows)
}
