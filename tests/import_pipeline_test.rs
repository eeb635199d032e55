//! End-to-end import pipeline tests
//!
//! Drives full source rows through extraction, building, persistence,
//! and view rebuilding against the in-memory store.

use nrpti::adapters::csv_source::CsvRow;
use nrpti::adapters::store::{InMemoryRecordStore, RecordStore};
use nrpti::core::build::ImportDefaults;
use nrpti::core::extract::{bcogc, cors, era};
use nrpti::core::import::ImportCoordinator;
use nrpti::core::views::ViewUpdater;
use nrpti::domain::EntityType;
use std::sync::Arc;

fn pipeline() -> (Arc<InMemoryRecordStore>, ImportCoordinator) {
    let store = Arc::new(InMemoryRecordStore::new());
    let coordinator = ImportCoordinator::new(store.clone(), ImportDefaults::default());
    (store, coordinator)
}

#[tokio::test]
async fn test_bcogc_coastal_gaslink_row_links_project() {
    let (store, coordinator) = pipeline();

    let row = CsvRow::from([
        ("operator", "Coastal GasLink Pipeline Ltd."),
        ("order_number", "2023-016"),
        ("title", "General Order 2023-016"),
        ("regulation", "EPMR"),
        ("issued_date", "01/15/2023"),
    ]);
    let summary = coordinator
        .persist_seeds("bcogc", vec![bcogc::seed(&row)])
        .await;
    assert_eq!(summary.created, 1);

    let record = store
        .find_by_source_ref("bcogc-csv", "2023-016")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.schema_name, "Order");
    assert_eq!(record.project_name.as_deref(), Some("Coastal Gaslink"));
    assert_eq!(
        record.epic_project_id.as_deref(),
        Some("588511c4aaecd9001b825604")
    );
    assert_eq!(
        record.issuing_agency.as_deref(),
        Some("BC Oil and Gas Commission")
    );
    let legislation = record.legislation.unwrap();
    assert_eq!(
        legislation.regulation.as_deref(),
        Some("Environmental Protection and Management Regulation")
    );
}

#[tokio::test]
async fn test_era_entity_type_heuristics() {
    let (store, coordinator) = pipeline();

    let company_row = CsvRow::from([
        ("case_number", "ERA-1"),
        ("client_type_code", "C"),
        ("client_name", "Northwood Pulp Ltd."),
    ]);
    let blank_code_row = CsvRow::from([
        ("case_number", "ERA-2"),
        ("client_type_code", ""),
        ("client_name", "Jane Doe"),
    ]);

    coordinator
        .persist_seeds(
            "era",
            vec![era::seed(&company_row), era::seed(&blank_code_row)],
        )
        .await;

    let company = store
        .find_by_source_ref("era-csv", "ERA-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(company.issued_to.unwrap().entity_type, EntityType::Company);

    let person = store
        .find_by_source_ref("era-csv", "ERA-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        person.issued_to.unwrap().entity_type,
        EntityType::Individual
    );
}

#[tokio::test]
async fn test_cors_agency_from_case_number_prefix() {
    let (store, coordinator) = pipeline();

    let park_row = CsvRow::from([("case_number", "P-2023-100"), ("last_name", "Doe")]);
    let cos_row = CsvRow::from([("case_number", "C-2023-200"), ("last_name", "Roe")]);

    coordinator
        .persist_seeds("cors", vec![cors::seed(&park_row), cors::seed(&cos_row)])
        .await;

    let park = store
        .find_by_source_ref("cors-csv", "P-2023-100")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(park.issuing_agency.as_deref(), Some("BC Parks"));

    let cos = store
        .find_by_source_ref("cors-csv", "C-2023-200")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        cos.issuing_agency.as_deref(),
        Some("Conservation Officer Service")
    );
}

#[tokio::test]
async fn test_location_view_includes_only_allowlisted_schemas() {
    let (store, coordinator) = pipeline();

    // One Order (allow-listed for location) and one Ticket (not).
    let order_row = CsvRow::from([("operator", "Some Operator"), ("order_number", "2023-001")]);
    let ticket_row = CsvRow::from([("case_number", "C-2023-300"), ("last_name", "Doe")]);
    coordinator
        .persist_seeds("bcogc", vec![bcogc::seed(&order_row)])
        .await;
    coordinator
        .persist_seeds("cors", vec![cors::seed(&ticket_row)])
        .await;
    assert_eq!(store.record_count().await, 2);

    let updater = ViewUpdater::new(store.clone());
    updater.rebuild_all().await.unwrap();

    let location = store.read_view("location_subset").await.unwrap();
    assert_eq!(location.len(), 1);
    assert_eq!(location[0].get_str("_schemaName").unwrap(), "Order");
}

#[tokio::test]
async fn test_full_pipeline_reimport_and_views_stay_stable() {
    let (store, coordinator) = pipeline();
    let updater = ViewUpdater::new(store.clone());

    let row = CsvRow::from([
        ("case_number", "ERA-9"),
        ("client_type_code", "C"),
        ("client_name", "Northwood Pulp Ltd."),
        ("penalty_amount", "$40,000"),
        ("date_issued", "2023-03-20"),
        ("contravention", "Unauthorized discharge of waste"),
    ]);

    coordinator.persist_seeds("era", vec![era::seed(&row)]).await;
    updater.rebuild_all().await.unwrap();
    let first = store.read_view("outcome_description_subset").await.unwrap();
    assert_eq!(first.len(), 1);

    // Re-import the same row and rebuild; contents must not change shape.
    let summary = coordinator.persist_seeds("era", vec![era::seed(&row)]).await;
    assert_eq!(summary.updated, 1);
    updater.rebuild_all().await.unwrap();

    let second = store.read_view("outcome_description_subset").await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(
        first[0].get_str("_id").unwrap(),
        second[0].get_str("_id").unwrap()
    );
}
