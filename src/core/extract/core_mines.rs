//! CORE field extraction
//!
//! Mapping rules for record payloads fetched from the authenticated
//! CORE mines API. Unlike the CSV sources, CORE delivers typed JSON,
//! and one feed carries several record categories discriminated by a
//! type code.

use super::parse_date;
use crate::core::build::RecordSeed;
use crate::domain::Entity;
use serde_json::Value;

/// Source system tag stamped on every CORE record
pub const SOURCE_SYSTEM_REF: &str = "core";

const ISSUING_AGENCY: &str = "Ministry of Energy, Mines and Low Carbon Innovation";

/// Type code → canonical discriminator
///
/// Codes outside the table pass through raw so type resolution can
/// report the offending code instead of a generic failure.
const TYPE_CODES: &[(&str, &str)] = &[
    ("ORD", "Order"),
    ("INS", "Inspection"),
    ("WRN", "Warning"),
    ("ADP", "AdministrativePenalty"),
];

fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Canonical type discriminator for a payload
///
/// A missing code maps to the empty string, which type resolution
/// rejects like any other unknown discriminator.
pub fn declared_type(value: &Value) -> String {
    let raw = get_str(value, "type_code").unwrap_or("");
    TYPE_CODES
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, discriminator)| *discriminator)
        .unwrap_or(raw)
        .to_string()
}

/// Issuing agency for all CORE records
pub fn issuing_agency() -> String {
    ISSUING_AGENCY.to_string()
}

/// Issued-to entity from the payload's party object
///
/// Party type code `ORG` is a company; anything else is an individual.
pub fn entity(value: &Value) -> Option<Entity> {
    let party = value.get("issued_to")?;
    let name = get_str(party, "party_name")?;

    let entity = match get_str(party, "party_type_code") {
        Some("ORG") => Entity::company(name),
        _ => Entity::individual(name),
    };
    Some(entity)
}

/// Record name, preferring the explicit name over the permit number
pub fn record_name(value: &Value) -> Option<String> {
    get_str(value, "record_name")
        .or_else(|| get_str(value, "permit_no"))
        .map(str::to_string)
}

/// Date the record was issued
pub fn issue_date(value: &Value) -> Option<chrono::DateTime<chrono::Utc>> {
    parse_date(get_str(value, "issue_date")?, &["%Y-%m-%d"])
}

/// Geocoded centroid as `[longitude, latitude]`
pub fn centroid(value: &Value) -> Option<[f64; 2]> {
    let latitude = value.get("latitude")?.as_f64()?;
    let longitude = value.get("longitude")?.as_f64()?;
    Some([longitude, latitude])
}

/// Maps one CORE payload to a record seed
pub fn seed(value: &Value) -> RecordSeed {
    let mut seed = RecordSeed::new(declared_type(value), SOURCE_SYSTEM_REF);
    seed.source_ref_id = get_str(value, "record_id").map(str::to_string);
    seed.record_name = record_name(value);
    seed.date_issued = issue_date(value);
    seed.issuing_agency = Some(issuing_agency());
    seed.issued_to = entity(value);
    seed.description = get_str(value, "description").map(str::to_string);
    seed.summary = get_str(value, "summary").map(str::to_string);
    seed.location = get_str(value, "mine_name").map(str::to_string);
    seed.centroid = centroid(value);
    seed.source_date_added = parse_date(
        get_str(value, "create_timestamp").unwrap_or(""),
        &["%Y-%m-%d"],
    );
    seed.source_date_updated = parse_date(
        get_str(value, "update_timestamp").unwrap_or(""),
        &["%Y-%m-%d"],
    );
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityType;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("ORD", "Order")]
    #[test_case("INS", "Inspection")]
    #[test_case("WRN", "Warning")]
    #[test_case("ADP", "AdministrativePenalty")]
    fn test_declared_type_table(code: &str, expected: &str) {
        let payload = json!({ "type_code": code });
        assert_eq!(declared_type(&payload), expected);
    }

    #[test]
    fn test_declared_type_unknown_passes_through_raw() {
        let payload = json!({ "type_code": "PMT" });
        assert_eq!(declared_type(&payload), "PMT");
    }

    #[test]
    fn test_declared_type_missing_is_empty() {
        assert_eq!(declared_type(&json!({})), "");
    }

    #[test]
    fn test_entity_org_and_person() {
        let payload = json!({
            "issued_to": { "party_type_code": "ORG", "party_name": "Teck Coal Limited" }
        });
        let entity = entity(&payload).unwrap();
        assert_eq!(entity.entity_type, EntityType::Company);

        let payload = json!({
            "issued_to": { "party_type_code": "PER", "party_name": "Jane Doe" }
        });
        let entity = super::entity(&payload).unwrap();
        assert_eq!(entity.entity_type, EntityType::Individual);
        assert_eq!(entity.full_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_centroid_is_lng_lat() {
        let payload = json!({ "latitude": 49.7, "longitude": -114.9 });
        assert_eq!(centroid(&payload), Some([-114.9, 49.7]));
        assert_eq!(centroid(&json!({ "latitude": 49.7 })), None);
    }

    #[test]
    fn test_empty_payload_yields_none_everywhere() {
        let payload = json!({});
        assert_eq!(entity(&payload), None);
        assert_eq!(record_name(&payload), None);
        assert_eq!(issue_date(&payload), None);
        assert_eq!(centroid(&payload), None);
    }

    #[test]
    fn test_seed_inspection() {
        let payload = json!({
            "record_id": "7231",
            "type_code": "INS",
            "record_name": "Inspection 7231",
            "mine_name": "Elkview Operations",
            "issue_date": "2023-04-11",
            "issued_to": { "party_type_code": "ORG", "party_name": "Teck Coal Limited" },
            "latitude": 49.7,
            "longitude": -114.9
        });
        let seed = seed(&payload);

        assert_eq!(seed.record_type, "Inspection");
        assert_eq!(seed.source_system_ref, "core");
        assert_eq!(seed.source_ref_id.as_deref(), Some("7231"));
        assert_eq!(seed.location.as_deref(), Some("Elkview Operations"));
        assert_eq!(seed.centroid, Some([-114.9, 49.7]));
    }
}
