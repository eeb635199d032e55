//! Materialized view subset definitions
//!
//! Each subset is a denormalized search collection derived from the
//! canonical collection: a schema allowlist deciding which records
//! participate, plus a projection shaping each record into the subset's
//! document. The set of subsets is data, like the record type table.

use crate::domain::Record;
use mongodb::bson::{doc, Bson, Document};

/// One materialized view subset
pub struct ViewSubset {
    /// Subset name used in logs and CLI selection
    pub name: &'static str,

    /// Target collection for the subset's documents
    pub collection: &'static str,

    /// Schema names whose records participate in this subset
    pub schemas: &'static [&'static str],

    project: fn(&Record) -> Document,
}

impl ViewSubset {
    /// Whether a record's schema is allow-listed for this subset
    pub fn includes(&self, record: &Record) -> bool {
        self.schemas.contains(&record.schema_name.as_str())
    }

    /// Projects a record into the subset's document shape
    pub fn project(&self, record: &Record) -> Document {
        (self.project)(record)
    }
}

const ALL_SCHEMAS: &[&str] = &[
    "Order",
    "Inspection",
    "AdministrativePenalty",
    "Warning",
    "Ticket",
    "CourtConviction",
];

/// Enforcement categories that carry outcome text
const ENFORCEMENT_SCHEMAS: &[&str] = &["AdministrativePenalty", "Ticket", "CourtConviction"];

/// Categories the map-based search surfaces; ticketing and conviction
/// records rarely carry usable geocoding, so they stay out.
const LOCATED_SCHEMAS: &[&str] = &["Order", "Inspection", "AdministrativePenalty", "Warning"];

/// Narrative categories with description/summary text worth indexing
const NARRATIVE_SCHEMAS: &[&str] = &["Order", "Inspection", "Warning"];

fn opt_str(value: &Option<String>) -> Bson {
    match value {
        Some(v) => Bson::String(v.clone()),
        None => Bson::Null,
    }
}

fn opt_date(value: &Option<chrono::DateTime<chrono::Utc>>) -> Bson {
    match value {
        Some(v) => Bson::DateTime(mongodb::bson::DateTime::from_millis(v.timestamp_millis())),
        None => Bson::Null,
    }
}

fn base_doc(record: &Record) -> Document {
    doc! {
        "_id": record.id.clone(),
        "_schemaName": record.schema_name.clone(),
        "recordName": opt_str(&record.record_name),
        "dateIssued": opt_date(&record.date_issued),
    }
}

fn project_location(record: &Record) -> Document {
    let mut document = base_doc(record);
    document.insert("location", opt_str(&record.location));
    document.insert(
        "centroid",
        match record.centroid {
            Some([lng, lat]) => Bson::Array(vec![Bson::Double(lng), Bson::Double(lat)]),
            None => Bson::Null,
        },
    );
    document
}

fn project_issuer(record: &Record) -> Document {
    let mut document = base_doc(record);
    document.insert("issuingAgency", opt_str(&record.issuing_agency));
    document.insert(
        "issuedTo",
        match &record.issued_to {
            // Entity serialization is infallible: plain strings and an enum tag
            Some(entity) => mongodb::bson::to_bson(entity).unwrap_or(Bson::Null),
            None => Bson::Null,
        },
    );
    document
}

fn project_record_name(record: &Record) -> Document {
    let mut document = base_doc(record);
    document.insert("recordType", opt_str(&record.record_type));
    document
}

fn project_description_summary(record: &Record) -> Document {
    let mut document = base_doc(record);
    document.insert("description", opt_str(&record.description));
    document.insert("summary", opt_str(&record.summary));
    document
}

fn project_outcome_description(record: &Record) -> Document {
    let mut document = base_doc(record);
    document.insert("issuingAgency", opt_str(&record.issuing_agency));
    document.insert(
        "outcomeDescription",
        opt_str(&record.outcome_description),
    );
    document
}

/// The full set of materialized view subsets
pub const SUBSETS: &[ViewSubset] = &[
    ViewSubset {
        name: "location",
        collection: "location_subset",
        schemas: LOCATED_SCHEMAS,
        project: project_location,
    },
    ViewSubset {
        name: "issuer",
        collection: "issuer_subset",
        schemas: ALL_SCHEMAS,
        project: project_issuer,
    },
    ViewSubset {
        name: "record_name",
        collection: "record_name_subset",
        schemas: ALL_SCHEMAS,
        project: project_record_name,
    },
    ViewSubset {
        name: "description_summary",
        collection: "description_summary_subset",
        schemas: NARRATIVE_SCHEMAS,
        project: project_description_summary,
    },
    ViewSubset {
        name: "outcome_description",
        collection: "outcome_description_subset",
        schemas: ENFORCEMENT_SCHEMAS,
        project: project_outcome_description,
    },
];

/// Finds a subset by name
pub fn find(name: &str) -> Option<&'static ViewSubset> {
    SUBSETS.iter().find(|subset| subset.name == name)
}
