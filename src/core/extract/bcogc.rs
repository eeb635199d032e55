//! BCOGC field extraction
//!
//! Mapping rules for the BC Oil and Gas Commission enforcement-orders
//! CSV export. Rows arrive as [`CsvRow`] maps; every extractor returns
//! `None` for missing or blank input rather than failing.

use super::{parse_date, parse_dollars};
use crate::adapters::csv_source::CsvRow;
use crate::core::build::RecordSeed;
use crate::domain::{Entity, Legislation, Penalty};

/// Source system tag stamped on every BCOGC record
pub const SOURCE_SYSTEM_REF: &str = "bcogc-csv";

/// Every BCOGC row is an enforcement order
pub const RECORD_TYPE: &str = "Order";

const ISSUING_AGENCY: &str = "BC Oil and Gas Commission";

const ACT: &str = "Energy Resource Activities Act";

/// Operator name → (project name, EPIC project id)
///
/// The match is exact and case-sensitive to the source's raw encoding.
/// Operators outside the table have no associated project, so the
/// fallback is `None`, not a raw passthrough.
const PROJECTS: &[(&str, (&str, &str))] = &[
    (
        "Coastal GasLink Pipeline Ltd.",
        ("Coastal Gaslink", "588511c4aaecd9001b825604"),
    ),
    (
        "LNG Canada Development Inc.",
        ("LNG Canada", "588510cdaaecd9001b815f84"),
    ),
];

/// Regulation abbreviation → full regulation name
///
/// Unmapped abbreviations pass through as the raw value: an unlisted
/// code is still meaningful citation text.
const REGULATIONS: &[(&str, &str)] = &[
    ("OGAA", "Oil and Gas Activities Act"),
    ("ERAA", "Energy Resource Activities Act"),
    ("DPR", "Drilling and Production Regulation"),
    ("EPMR", "Environmental Protection and Management Regulation"),
    ("LNGR", "Liquefied Natural Gas Facility Regulation"),
    ("PR", "Pipeline Regulation"),
];

/// Issuing agency for all BCOGC records
pub fn issuing_agency() -> String {
    ISSUING_AGENCY.to_string()
}

/// Associated project for the row's operator
pub fn project(row: &CsvRow) -> Option<(String, String)> {
    let operator = row.get("operator")?;
    PROJECTS
        .iter()
        .find(|(key, _)| *key == operator)
        .map(|(_, (name, epic_id))| (name.to_string(), epic_id.to_string()))
}

/// Full regulation name for the row's regulation abbreviation
pub fn regulation(row: &CsvRow) -> Option<String> {
    let raw = row.get("regulation")?;
    let mapped = REGULATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == raw)
        .map(|(_, full)| *full)
        .unwrap_or(raw);
    Some(mapped.to_string())
}

/// Issued-to entity from the operator name
///
/// BCOGC orders are always issued to the operating company.
pub fn entity(row: &CsvRow) -> Option<Entity> {
    row.get("operator").map(Entity::company)
}

/// Issued date, `mm/dd/yyyy` in the export
pub fn issued_date(row: &CsvRow) -> Option<chrono::DateTime<chrono::Utc>> {
    parse_date(row.get("issued_date")?, &["%m/%d/%Y"])
}

/// Legislation citation for the row
///
/// The act is fixed for the source; the description falls back from the
/// order title to the category name so the citation is never half-built.
pub fn legislation(row: &CsvRow) -> Legislation {
    let description = row
        .get("title")
        .map(str::to_string)
        .unwrap_or_else(|| "General Order".to_string());

    Legislation::with_description(Some(ACT.to_string()), regulation(row), description)
}

/// Administrative penalty attached to the order, if any
pub fn penalty(row: &CsvRow) -> Option<Penalty> {
    parse_dollars(row.get("penalty_amount")?).map(Penalty::fined_dollars)
}

/// Maps one BCOGC CSV row to a record seed
pub fn seed(row: &CsvRow) -> RecordSeed {
    let mut seed = RecordSeed::new(RECORD_TYPE, SOURCE_SYSTEM_REF);
    seed.source_ref_id = row.get("order_number").map(str::to_string);
    seed.record_name = row
        .get("title")
        .or_else(|| row.get("order_number"))
        .map(str::to_string);
    seed.date_issued = issued_date(row);
    seed.issuing_agency = Some(issuing_agency());
    seed.issued_to = entity(row);
    seed.legislation = Some(legislation(row));
    seed.penalties = penalty(row).into_iter().collect();
    seed.description = row.get("description").map(str::to_string);
    seed.project = project(row);
    seed.location = row.get("location").map(str::to_string);
    seed
}
