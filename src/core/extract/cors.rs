//! CORS field extraction
//!
//! Mapping rules for the Conservation Officer Service ticket CSV
//! export. CORS rows cover violation tickets issued both by conservation
//! officers and by park rangers; the issuing agency is recovered from
//! the case-number prefix.

use super::{parse_date, parse_dollars};
use crate::adapters::csv_source::CsvRow;
use crate::core::build::RecordSeed;
use crate::domain::{Entity, Legislation, Penalty};

/// Source system tag stamped on every CORS record
pub const SOURCE_SYSTEM_REF: &str = "cors-csv";

/// Every CORS row is a violation ticket
pub const RECORD_TYPE: &str = "Ticket";

/// Act code → full statute name
///
/// Unmapped codes pass through as the raw value.
const ACTS: &[(&str, &str)] = &[
    ("PA", "Park Act"),
    ("WA", "Wildlife Act"),
    ("FA", "Fisheries Act (Canada)"),
    ("EMA", "Environmental Management Act"),
    ("ORVA", "Off-Road Vehicle Act"),
];

/// Issuing agency from the case number
///
/// Case numbers beginning with `p-` (case-insensitive) are park-ranger
/// tickets issued under BC Parks; everything else is the Conservation
/// Officer Service. Missing case numbers yield `None`.
pub fn issuing_agency(row: &CsvRow) -> Option<String> {
    let case_number = row.get("case_number")?;
    let agency = if case_number.to_lowercase().starts_with("p-") {
        "BC Parks"
    } else {
        "Conservation Officer Service"
    };
    Some(agency.to_string())
}

/// Issued-to entity
///
/// A populated business-name column implies `Company`; otherwise the
/// personal name columns are joined into an `Individual`. A row with
/// neither yields `None`.
pub fn entity(row: &CsvRow) -> Option<Entity> {
    if let Some(business) = row.get("business_name") {
        return Some(Entity::company(business));
    }

    let full_name = [
        row.get("first_name"),
        row.get("middle_name"),
        row.get("last_name"),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    if full_name.is_empty() {
        None
    } else {
        Some(Entity::individual(full_name))
    }
}

/// Full statute name for the row's act code
pub fn act(row: &CsvRow) -> Option<String> {
    let raw = row.get("act")?;
    let mapped = ACTS
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, full)| *full)
        .unwrap_or(raw);
    Some(mapped.to_string())
}

/// Legislation citation carrying the ticketed offence
///
/// A ticket without offence text has no citation at all; a citation
/// with no offence would misrepresent an enforcement record.
pub fn legislation(row: &CsvRow) -> Option<Legislation> {
    let offence = row.get("offence_description")?.to_string();
    let mut citation = Legislation::with_offence(act(row), None, offence);
    if let Some(section) = row.get("section") {
        citation = citation.section(section);
    }
    Some(citation)
}

/// The ticket's fine, when the amount parses
pub fn penalty(row: &CsvRow) -> Option<Penalty> {
    parse_dollars(row.get("fine_amount")?).map(Penalty::fined_dollars)
}

/// Ticket date, ISO `yyyy-mm-dd` in the export
pub fn ticket_date(row: &CsvRow) -> Option<chrono::DateTime<chrono::Utc>> {
    parse_date(row.get("ticket_date")?, &["%Y-%m-%d", "%m/%d/%Y"])
}

/// Maps one CORS CSV row to a record seed
pub fn seed(row: &CsvRow) -> RecordSeed {
    let mut seed = RecordSeed::new(RECORD_TYPE, SOURCE_SYSTEM_REF);
    seed.source_ref_id = row.get("case_number").map(str::to_string);
    seed.record_name = row.get("case_number").map(str::to_string);
    seed.date_issued = ticket_date(row);
    seed.issuing_agency = issuing_agency(row);
    seed.issued_to = entity(row);
    seed.legislation = legislation(row);
    seed.penalties = penalty(row).into_iter().collect();
    seed.description = row.get("offence_description").map(str::to_string);
    seed.location = row.get("location").map(str::to_string);
    seed
}
