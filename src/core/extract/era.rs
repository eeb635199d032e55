//! ERA field extraction
//!
//! Mapping rules for the Environmental Responsibility and
//! Administrative-penalties CSV export. ERA rows are administrative
//! penalties issued under the Environmental Management Act.

use super::{parse_date, parse_dollars};
use crate::adapters::csv_source::CsvRow;
use crate::core::build::RecordSeed;
use crate::domain::{Entity, EntityType, Legislation, Penalty};

/// Source system tag stamped on every ERA record
pub const SOURCE_SYSTEM_REF: &str = "era-csv";

/// Every ERA row is an administrative penalty
pub const RECORD_TYPE: &str = "AdministrativePenalty";

const ISSUING_AGENCY: &str = "Ministry of Environment and Climate Change Strategy";

const ACT: &str = "Environmental Management Act";

/// Entity type from the client type code
///
/// `"C"` (exact, case-sensitive) is a company; every other value,
/// including a blank or missing code, is an individual. This is total by
/// design: the source leaves the code empty for natural persons, so
/// "unknown" and "person" are the same bucket.
pub fn entity_type(client_type_code: Option<&str>) -> EntityType {
    match client_type_code {
        Some("C") => EntityType::Company,
        _ => EntityType::Individual,
    }
}

/// Issuing agency for all ERA records
pub fn issuing_agency() -> String {
    ISSUING_AGENCY.to_string()
}

/// Issued-to entity
///
/// The client type code decides the shape; a row with no client name has
/// no entity at all.
pub fn entity(row: &CsvRow) -> Option<Entity> {
    let name = row.get("client_name")?;
    let entity = match entity_type(row.get("client_type_code")) {
        EntityType::Company => Entity::company(name),
        EntityType::Individual => Entity::individual(name),
    };
    Some(entity)
}

/// Legislation citation for the penalized contravention
pub fn legislation(row: &CsvRow) -> Option<Legislation> {
    let offence = row.get("contravention")?.to_string();
    let mut citation = Legislation::with_offence(Some(ACT.to_string()), None, offence);
    if let Some(section) = row.get("section") {
        citation = citation.section(section);
    }
    Some(citation)
}

/// The assessed penalty, when the amount parses
pub fn penalty(row: &CsvRow) -> Option<Penalty> {
    parse_dollars(row.get("penalty_amount")?).map(Penalty::fined_dollars)
}

/// Date the penalty was issued, ISO `yyyy-mm-dd` in the export
pub fn issued_date(row: &CsvRow) -> Option<chrono::DateTime<chrono::Utc>> {
    parse_date(row.get("date_issued")?, &["%Y-%m-%d"])
}

/// Maps one ERA CSV row to a record seed
pub fn seed(row: &CsvRow) -> RecordSeed {
    let mut seed = RecordSeed::new(RECORD_TYPE, SOURCE_SYSTEM_REF);
    seed.source_ref_id = row.get("case_number").map(str::to_string);
    seed.record_name = row.get("case_number").map(str::to_string);
    seed.date_issued = issued_date(row);
    seed.issuing_agency = Some(issuing_agency());
    seed.issued_to = entity(row);
    seed.legislation = legislation(row);
    seed.penalties = penalty(row).into_iter().collect();
    seed.summary = row.get("summary").map(str::to_string);
    seed.outcome_description = row.get("outcome").map(str::to_string);
    seed.location = row.get("location").map(str::to_string);
    seed
}
