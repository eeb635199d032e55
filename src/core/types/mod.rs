//! Record type resolution
//!
//! Maps a source-declared type discriminator to the descriptor bundle
//! used for persistence routing. The supported-type set is data, not
//! code: a single immutable table, so adding a category is a one-line
//! change and the whole mapping is testable by iterating the table.

use crate::domain::{NrptiError, Result};

/// Descriptor bundle for one supported record category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTypeDescriptor {
    /// Canonical schema name (the `_schemaName` discriminator)
    pub schema_name: &'static str,

    /// Human-readable display name
    pub display_name: &'static str,

    /// REST sub-resource used for persistence routing
    pub sub_resource: &'static str,
}

/// The supported record categories, keyed by source-declared
/// discriminator
pub const RECORD_TYPES: &[(&str, RecordTypeDescriptor)] = &[
    (
        "Order",
        RecordTypeDescriptor {
            schema_name: "Order",
            display_name: "Order",
            sub_resource: "orders",
        },
    ),
    (
        "Inspection",
        RecordTypeDescriptor {
            schema_name: "Inspection",
            display_name: "Inspection",
            sub_resource: "inspections",
        },
    ),
    (
        "AdministrativePenalty",
        RecordTypeDescriptor {
            schema_name: "AdministrativePenalty",
            display_name: "Administrative Penalty",
            sub_resource: "administrativePenalties",
        },
    ),
    (
        "Warning",
        RecordTypeDescriptor {
            schema_name: "Warning",
            display_name: "Warning",
            sub_resource: "warnings",
        },
    ),
    (
        "Ticket",
        RecordTypeDescriptor {
            schema_name: "Ticket",
            display_name: "Ticket",
            sub_resource: "tickets",
        },
    ),
    (
        "CourtConviction",
        RecordTypeDescriptor {
            schema_name: "CourtConviction",
            display_name: "Court Conviction",
            sub_resource: "courtConvictions",
        },
    ),
];

/// Resolves a source-declared type discriminator
///
/// The match is exact and case-sensitive.
///
/// # Errors
///
/// Returns `NrptiError::UnsupportedRecordType` for any discriminator not
/// in the table. This is surfaced, never defaulted: routing a record to
/// the wrong sub-resource would corrupt the canonical collection's type
/// invariant.
pub fn resolve(discriminator: &str) -> Result<&'static RecordTypeDescriptor> {
    RECORD_TYPES
        .iter()
        .find(|(key, _)| *key == discriminator)
        .map(|(_, descriptor)| descriptor)
        .ok_or_else(|| NrptiError::UnsupportedRecordType {
            record_type: discriminator.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_table_entry() {
        for (discriminator, descriptor) in RECORD_TYPES {
            let resolved = resolve(discriminator).unwrap();
            assert_eq!(resolved, descriptor);
            assert!(!resolved.schema_name.is_empty());
            assert!(!resolved.display_name.is_empty());
            assert!(!resolved.sub_resource.is_empty());
        }
    }

    #[test]
    fn test_resolve_order() {
        let descriptor = resolve("Order").unwrap();
        assert_eq!(descriptor.schema_name, "Order");
        assert_eq!(descriptor.display_name, "Order");
        assert_eq!(descriptor.sub_resource, "orders");
    }

    #[test]
    fn test_resolve_administrative_penalty() {
        let descriptor = resolve("AdministrativePenalty").unwrap();
        assert_eq!(descriptor.display_name, "Administrative Penalty");
        assert_eq!(descriptor.sub_resource, "administrativePenalties");
    }

    #[test]
    fn test_resolve_unknown_discriminator() {
        let err = resolve("Certificate").unwrap_err();
        match err {
            crate::domain::NrptiError::UnsupportedRecordType { record_type } => {
                assert_eq!(record_type, "Certificate");
            }
            other => panic!("expected UnsupportedRecordType, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert!(resolve("order").is_err());
        assert!(resolve("ORDER").is_err());
    }

    #[test]
    fn test_schema_names_are_unique() {
        for (i, (_, a)) in RECORD_TYPES.iter().enumerate() {
            for (_, b) in RECORD_TYPES.iter().skip(i + 1) {
                assert_ne!(a.schema_name, b.schema_name);
                assert_ne!(a.sub_resource, b.sub_resource);
            }
        }
    }
}
