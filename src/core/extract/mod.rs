//! Per-source field extraction
//!
//! Each source module is a set of pure functions mapping raw source
//! fields to canonical values. Extractors never touch I/O or shared
//! state, which keeps every mapping rule unit-testable with literal
//! inputs.
//!
//! Missing-value policy is deliberately per field, not global. Some
//! fields pass unmapped raw input through (an unrecognized act code is
//! still useful text), others normalize to `None` (an unparseable date
//! is worse than no date). Each extractor documents which policy it
//! follows; do not "unify" them.

pub mod bcogc;
pub mod core_mines;
pub mod cors;
pub mod era;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Parses a source date string against an ordered list of formats
///
/// Date-only formats resolve to midnight UTC. Unparseable input maps to
/// `None`: a wrong date is worse than an absent one, so there is no raw
/// passthrough here.
pub(crate) fn parse_date(raw: &str, formats: &[&str]) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight));
        }
    }

    None
}

/// Parses a currency amount like `"$1,500.00"` into a dollar value
///
/// Unparseable input maps to `None`.
pub(crate) fn parse_dollars(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date_formats() {
        let date = parse_date("01/15/2023", &["%m/%d/%Y"]).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 1, 15));

        let date = parse_date("2023-06-01", &["%Y-%m-%d"]).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 6, 1));
    }

    #[test]
    fn test_parse_date_rfc3339_always_accepted() {
        let date = parse_date("2023-02-03T10:30:00Z", &["%m/%d/%Y"]).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 2, 3));
    }

    #[test]
    fn test_parse_date_garbage_is_none() {
        assert_eq!(parse_date("not a date", &["%m/%d/%Y"]), None);
        assert_eq!(parse_date("", &["%m/%d/%Y"]), None);
        assert_eq!(parse_date("13/45/2023", &["%m/%d/%Y"]), None);
    }

    #[test]
    fn test_parse_dollars() {
        assert_eq!(parse_dollars("$1,500.00"), Some(1500.0));
        assert_eq!(parse_dollars("575"), Some(575.0));
        assert_eq!(parse_dollars(" $20 "), Some(20.0));
        assert_eq!(parse_dollars("waived"), None);
        assert_eq!(parse_dollars(""), None);
    }
}
