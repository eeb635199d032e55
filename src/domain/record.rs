//! Canonical record domain model
//!
//! This module defines the canonical `Record` type stored in the shared
//! polymorphic `nrpti` collection, its sub-objects (`Entity`,
//! `Legislation`, `Penalty`) and the `RecordBuilder` used by the
//! per-category record builders.
//!
//! The collection is polymorphic: one document shape for every record
//! subtype, discriminated by `_schemaName`. Fields a subtype does not
//! populate are serialized as `null`, never omitted, so the union schema
//! stays stable across subtypes. Records are soft-deleted via
//! `isDeleted` and never physically removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of the party a record was issued to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    /// A business/corporate entity
    Company,
    /// A natural person
    Individual,
}

/// The party a record was issued to
///
/// Derived from source-specific heuristics: the presence of a
/// business-name field implies `Company`, personal name fields imply
/// `Individual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity type discriminator
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Business name (populated for `Company`)
    pub company_name: Option<String>,

    /// Full personal name (populated for `Individual`)
    pub full_name: Option<String>,
}

impl Entity {
    /// Creates a `Company` entity
    pub fn company(name: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Company,
            company_name: Some(name.into()),
            full_name: None,
        }
    }

    /// Creates an `Individual` entity
    pub fn individual(full_name: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Individual,
            company_name: None,
            full_name: Some(full_name.into()),
        }
    }
}

/// A legislation citation
///
/// Carries either an `offence` (enforcement actions with a defined
/// offence) or a free-text `legislation_description` — never both. The
/// two constructors enforce the exclusivity; there is no way to build a
/// citation with both populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legislation {
    /// Full statute name
    pub act: Option<String>,

    /// Full regulation name
    pub regulation: Option<String>,

    /// Section number
    pub section: Option<String>,

    /// Sub-section number
    pub sub_section: Option<String>,

    /// Paragraph
    pub paragraph: Option<String>,

    /// Offence text (enforcement actions)
    pub offence: Option<String>,

    /// Free-text description (non-enforcement records)
    pub legislation_description: Option<String>,
}

impl Legislation {
    /// Creates a citation carrying an offence (enforcement action)
    pub fn with_offence(act: Option<String>, regulation: Option<String>, offence: String) -> Self {
        Self {
            act,
            regulation,
            section: None,
            sub_section: None,
            paragraph: None,
            offence: Some(offence),
            legislation_description: None,
        }
    }

    /// Creates a citation carrying a free-text description
    pub fn with_description(
        act: Option<String>,
        regulation: Option<String>,
        description: String,
    ) -> Self {
        Self {
            act,
            regulation,
            section: None,
            sub_section: None,
            paragraph: None,
            offence: None,
            legislation_description: Some(description),
        }
    }

    /// Sets the section
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// Nested penalty amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyAmount {
    /// Unit of the amount (e.g. `Dollars`)
    #[serde(rename = "type")]
    pub unit: String,

    /// Numeric value, if the source supplied a parseable one
    pub value: Option<f64>,
}

/// A penalty attached to an enforcement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    /// Penalty category (e.g. `Fined`)
    #[serde(rename = "type")]
    pub penalty_type: String,

    /// Amount with unit, or `None` when the source has none
    pub penalty: Option<PenaltyAmount>,

    /// Free-text description
    pub description: Option<String>,
}

impl Penalty {
    /// Creates a monetary fine in dollars
    pub fn fined_dollars(value: f64) -> Self {
        Self {
            penalty_type: "Fined".to_string(),
            penalty: Some(PenaltyAmount {
                unit: "Dollars".to_string(),
                value: Some(value),
            }),
            description: None,
        }
    }
}

/// Canonical regulatory record
///
/// The single source-of-truth document for a regulatory record in the
/// shared polymorphic collection. `schema_name` determines which subtype
/// fields are meaningful; all others remain `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier (`_id` in the canonical collection)
    #[serde(rename = "_id")]
    pub id: String,

    /// Schema name discriminator (e.g. `Order`, `Inspection`)
    #[serde(rename = "_schemaName")]
    pub schema_name: String,

    /// Roles allowed to read this record
    pub read: Vec<String>,

    /// Roles allowed to write this record
    pub write: Vec<String>,

    /// Audit: who created the record
    pub added_by: String,

    /// Audit: creation timestamp
    pub date_added: DateTime<Utc>,

    /// Audit: who last updated the record
    pub updated_by: String,

    /// Audit: last-update timestamp
    pub date_updated: DateTime<Utc>,

    /// Identifier of this record in its source system
    #[serde(rename = "_sourceRefId")]
    pub source_ref_id: Option<String>,

    /// Source system tag (e.g. `bcogc-csv`, `core`)
    pub source_system_ref: String,

    /// Timestamp the record was created in the source system
    pub source_date_added: Option<DateTime<Utc>>,

    /// Timestamp the record was last updated in the source system
    pub source_date_updated: Option<DateTime<Utc>>,

    /// Human-readable record name
    pub record_name: Option<String>,

    /// Display name of the record category
    pub record_type: Option<String>,

    /// Date the order/inspection/penalty was issued
    pub date_issued: Option<DateTime<Utc>>,

    /// Issuing agency
    pub issuing_agency: Option<String>,

    /// Party the record was issued to
    pub issued_to: Option<Entity>,

    /// Legislation citation
    pub legislation: Option<Legislation>,

    /// Penalties (enforcement records); empty for other subtypes
    pub penalties: Vec<Penalty>,

    /// Free-text description
    pub description: Option<String>,

    /// Free-text summary
    pub summary: Option<String>,

    /// Outcome description (enforcement records)
    pub outcome_description: Option<String>,

    /// Associated project name
    pub project_name: Option<String>,

    /// EPIC project identifier for the associated project
    #[serde(rename = "_epicProjectId")]
    pub epic_project_id: Option<String>,

    /// Geocoded location description
    pub location: Option<String>,

    /// Geocoded centroid as `[longitude, latitude]`
    pub centroid: Option<[f64; 2]>,

    /// Soft-delete flag
    pub is_deleted: bool,
}

impl Record {
    /// Creates a new builder for constructing a `Record`
    pub fn builder(
        schema_name: impl Into<String>,
        source_system_ref: impl Into<String>,
    ) -> RecordBuilder {
        RecordBuilder::new(schema_name, source_system_ref)
    }

    /// A stable reference for logging and error reporting:
    /// `sourceSystemRef:sourceRefId`, falling back to the internal id.
    pub fn source_ref(&self) -> String {
        match &self.source_ref_id {
            Some(ref_id) => format!("{}:{}", self.source_system_ref, ref_id),
            None => format!("{}:{}", self.source_system_ref, self.id),
        }
    }
}

/// Builder for constructing canonical records
///
/// Unlike a validating builder, every optional field defaults to `None`
/// (or empty) so a record built from dirty source data is still fully
/// populated — partial records never reach persistence. The required
/// fields (`schema_name`, `source_system_ref`) are constructor
/// parameters, so `build` is infallible.
#[derive(Debug)]
pub struct RecordBuilder {
    id: Option<String>,
    schema_name: String,
    source_system_ref: String,
    read: Vec<String>,
    write: Vec<String>,
    added_by: String,
    updated_by: String,
    source_ref_id: Option<String>,
    source_date_added: Option<DateTime<Utc>>,
    source_date_updated: Option<DateTime<Utc>>,
    record_name: Option<String>,
    record_type: Option<String>,
    date_issued: Option<DateTime<Utc>>,
    issuing_agency: Option<String>,
    issued_to: Option<Entity>,
    legislation: Option<Legislation>,
    penalties: Vec<Penalty>,
    description: Option<String>,
    summary: Option<String>,
    outcome_description: Option<String>,
    project_name: Option<String>,
    epic_project_id: Option<String>,
    location: Option<String>,
    centroid: Option<[f64; 2]>,
}

impl RecordBuilder {
    /// Creates a new builder with pipeline defaults
    pub fn new(schema_name: impl Into<String>, source_system_ref: impl Into<String>) -> Self {
        Self {
            id: None,
            schema_name: schema_name.into(),
            source_system_ref: source_system_ref.into(),
            read: vec!["sysadmin".to_string()],
            write: vec!["sysadmin".to_string()],
            added_by: "SYSTEM_USER".to_string(),
            updated_by: "SYSTEM_USER".to_string(),
            source_ref_id: None,
            source_date_added: None,
            source_date_updated: None,
            record_name: None,
            record_type: None,
            date_issued: None,
            issuing_agency: None,
            issued_to: None,
            legislation: None,
            penalties: Vec::new(),
            description: None,
            summary: None,
            outcome_description: None,
            project_name: None,
            epic_project_id: None,
            location: None,
            centroid: None,
        }
    }

    /// Overrides the generated record id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the read/write permission role lists
    pub fn permissions(mut self, read: Vec<String>, write: Vec<String>) -> Self {
        self.read = read;
        self.write = write;
        self
    }

    /// Sets the audit user recorded for creation and update
    pub fn audit_user(mut self, user: impl Into<String>) -> Self {
        self.added_by = user.into();
        self.updated_by = self.added_by.clone();
        self
    }

    /// Sets the source record identifier
    pub fn source_ref_id(mut self, source_ref_id: Option<String>) -> Self {
        self.source_ref_id = source_ref_id;
        self
    }

    /// Sets the source creation timestamp
    pub fn source_date_added(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.source_date_added = date;
        self
    }

    /// Sets the source update timestamp
    pub fn source_date_updated(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.source_date_updated = date;
        self
    }

    /// Sets the record name
    pub fn record_name(mut self, name: Option<String>) -> Self {
        self.record_name = name;
        self
    }

    /// Sets the record category display name
    pub fn record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    /// Sets the issued date
    pub fn date_issued(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.date_issued = date;
        self
    }

    /// Sets the issuing agency
    pub fn issuing_agency(mut self, agency: Option<String>) -> Self {
        self.issuing_agency = agency;
        self
    }

    /// Sets the issued-to entity
    pub fn issued_to(mut self, entity: Option<Entity>) -> Self {
        self.issued_to = entity;
        self
    }

    /// Sets the legislation citation
    pub fn legislation(mut self, legislation: Option<Legislation>) -> Self {
        self.legislation = legislation;
        self
    }

    /// Sets the penalties
    pub fn penalties(mut self, penalties: Vec<Penalty>) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets the description
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the summary
    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    /// Sets the outcome description
    pub fn outcome_description(mut self, outcome: Option<String>) -> Self {
        self.outcome_description = outcome;
        self
    }

    /// Sets the associated project name and EPIC project id together.
    ///
    /// These travel as a pair: a project name without its EPIC id (or the
    /// reverse) would break project linking in the search layer.
    pub fn project(mut self, project: Option<(String, String)>) -> Self {
        match project {
            Some((name, epic_id)) => {
                self.project_name = Some(name);
                self.epic_project_id = Some(epic_id);
            }
            None => {
                self.project_name = None;
                self.epic_project_id = None;
            }
        }
        self
    }

    /// Sets the location description
    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Sets the centroid as `[longitude, latitude]`
    pub fn centroid(mut self, centroid: Option<[f64; 2]>) -> Self {
        self.centroid = centroid;
        self
    }

    /// Builds the record, stamping audit timestamps with the current time
    pub fn build(self) -> Record {
        let now = Utc::now();
        Record {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            schema_name: self.schema_name,
            read: self.read,
            write: self.write,
            added_by: self.added_by,
            date_added: now,
            updated_by: self.updated_by,
            date_updated: now,
            source_ref_id: self.source_ref_id,
            source_system_ref: self.source_system_ref,
            source_date_added: self.source_date_added,
            source_date_updated: self.source_date_updated,
            record_name: self.record_name,
            record_type: self.record_type,
            date_issued: self.date_issued,
            issuing_agency: self.issuing_agency,
            issued_to: self.issued_to,
            legislation: self.legislation,
            penalties: self.penalties,
            description: self.description,
            summary: self.summary,
            outcome_description: self.outcome_description,
            project_name: self.project_name,
            epic_project_id: self.epic_project_id,
            location: self.location,
            centroid: self.centroid,
            is_deleted: false,
        }
    }
}
