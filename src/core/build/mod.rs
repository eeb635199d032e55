//! Record building
//!
//! Composes extractor output plus pipeline defaults into canonical
//! records. A [`RecordSeed`] is the extractors' side of the contract:
//! one plain struct of normalized field values per source row.
//! [`build_record`] resolves the seed's type discriminator and applies
//! the per-category field policy before handing off to the
//! domain-level builder.

use crate::config::ImportConfig;
use crate::core::types;
use crate::domain::{Entity, Legislation, Penalty, Record, Result};
use chrono::{DateTime, Utc};

/// Pipeline defaults applied to every built record
#[derive(Debug, Clone)]
pub struct ImportDefaults {
    /// Audit user stamped as `addedBy`/`updatedBy`
    pub audit_user: String,

    /// Roles allowed to read imported records
    pub read_roles: Vec<String>,

    /// Roles allowed to write imported records
    pub write_roles: Vec<String>,
}

impl ImportDefaults {
    /// Builds defaults from import configuration
    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            audit_user: config.audit_user.clone(),
            read_roles: config.read_roles.clone(),
            write_roles: config.write_roles.clone(),
        }
    }
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self::from_config(&ImportConfig::default())
    }
}

/// Normalized field values extracted from one source row
///
/// Every field a source cannot supply stays `None`/empty; the builder
/// fills in the canonical null shape.
#[derive(Debug, Clone, Default)]
pub struct RecordSeed {
    /// Source-declared type discriminator
    pub record_type: String,
    /// Source system tag
    pub source_system_ref: String,
    pub source_ref_id: Option<String>,
    pub record_name: Option<String>,
    pub date_issued: Option<DateTime<Utc>>,
    pub issuing_agency: Option<String>,
    pub issued_to: Option<Entity>,
    pub legislation: Option<Legislation>,
    pub penalties: Vec<Penalty>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub outcome_description: Option<String>,
    /// Project name and EPIC project id, always paired
    pub project: Option<(String, String)>,
    pub location: Option<String>,
    pub centroid: Option<[f64; 2]>,
    pub source_date_added: Option<DateTime<Utc>>,
    pub source_date_updated: Option<DateTime<Utc>>,
}

impl RecordSeed {
    /// Creates an empty seed for a discriminator and source tag
    pub fn new(record_type: impl Into<String>, source_system_ref: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            source_system_ref: source_system_ref.into(),
            ..Self::default()
        }
    }
}

/// Whether a category carries monetary penalties
fn carries_penalties(schema_name: &str) -> bool {
    matches!(
        schema_name,
        "AdministrativePenalty" | "Ticket" | "CourtConviction" | "Order"
    )
}

/// Whether a category carries an enforcement outcome
fn carries_outcome(schema_name: &str) -> bool {
    matches!(
        schema_name,
        "AdministrativePenalty" | "Ticket" | "CourtConviction" | "Warning"
    )
}

/// Builds a canonical record from a seed
///
/// Resolves the seed's declared type, then applies the category's field
/// policy: penalties and outcome text only survive on the enforcement
/// categories that define them, so a stray extractor value can never
/// populate a field the subtype does not own.
///
/// # Errors
///
/// Returns `NrptiError::UnsupportedRecordType` when the discriminator is
/// not in the type table.
pub fn build_record(seed: RecordSeed, defaults: &ImportDefaults) -> Result<Record> {
    let descriptor = types::resolve(&seed.record_type)?;

    let penalties = if carries_penalties(descriptor.schema_name) {
        seed.penalties
    } else {
        Vec::new()
    };
    let outcome_description = if carries_outcome(descriptor.schema_name) {
        seed.outcome_description
    } else {
        None
    };

    let record = Record::builder(descriptor.schema_name, seed.source_system_ref)
        .permissions(defaults.read_roles.clone(), defaults.write_roles.clone())
        .audit_user(&defaults.audit_user)
        .source_ref_id(seed.source_ref_id)
        .source_date_added(seed.source_date_added)
        .source_date_updated(seed.source_date_updated)
        .record_name(seed.record_name)
        .record_type(descriptor.display_name)
        .date_issued(seed.date_issued)
        .issuing_agency(seed.issuing_agency)
        .issued_to(seed.issued_to)
        .legislation(seed.legislation)
        .penalties(penalties)
        .description(seed.description)
        .summary(seed.summary)
        .outcome_description(outcome_description)
        .project(seed.project)
        .location(seed.location)
        .centroid(seed.centroid)
        .build();

    Ok(record)
}
