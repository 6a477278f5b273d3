mod common;

use common::*;
use housing_finder::models::NewListing;
use housing_finder::transfer::{export_to_file, import_from_file, import_records, ImportReport};
use housing_finder::{FilterCriteria, SearchEngine};
use serde_json::json;

#[tokio::test]
async fn test_export_then_import_into_fresh_catalog() {
    let source = seeded_store().await;
    let villa = add(
        &source,
        NewListing {
            rooms: Some(5),
            has_parking: true,
            features: vec![POOL, GARAGE],
            ..listing("Villa", HOUSE, RIVERSIDE, 420_000.0, 230.0)
        },
    )
    .await;
    add(
        &source,
        NewListing {
            address: Some("1 Market Square".to_string()),
            ..listing("Loft", STUDIO, OLD_TOWN, 70_000.0, 35.0)
        },
    )
    .await;
    let sold = add(&source, listing("Sold", APARTMENT, CENTRAL, 1.0, 1.0)).await;
    source.delete_listing(sold).await.unwrap();
    source.get_listing(villa).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.json");
    let exported = export_to_file(&SearchEngine::new(source), &path)
        .await
        .unwrap();
    assert_eq!(exported, 2);

    let target = seeded_store().await;
    // Occupy the first id so imported ids cannot line up by accident
    add(&target, listing("Existing", APARTMENT, CENTRAL, 10.0, 10.0)).await;

    let report = import_from_file(&target, &path).await.unwrap();
    assert_eq!(
        report,
        ImportReport {
            imported: 2,
            skipped: 0
        }
    );

    let found = SearchEngine::new(target)
        .search(&FilterCriteria::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(found.len(), 3);

    let copy = found
        .iter()
        .find(|d| d.listing.title == "Villa")
        .unwrap();
    assert_ne!(copy.listing.id, villa);
    assert_eq!(copy.listing.views_count, 0);
    assert_eq!(copy.listing.rooms, Some(5));
    assert!(copy.listing.has_parking);
    assert_eq!(copy.property_type.name, "house");
    assert_eq!(copy.district.name, "Riverside");
    let features: Vec<i64> = copy.features.iter().map(|f| f.id).collect();
    assert_eq!(features, vec![POOL, GARAGE]);

    let loft = found.iter().find(|d| d.listing.title == "Loft").unwrap();
    assert_eq!(loft.listing.address.as_deref(), Some("1 Market Square"));
    assert!(found.iter().all(|d| d.listing.title != "Sold"));
}

#[tokio::test]
async fn test_bad_records_are_skipped() {
    let store = seeded_store().await;
    let records = vec![
        json!({"title": "Good", "price": 1, "area": 1, "type_id": HOUSE, "district_id": CENTRAL}),
        json!({"title": "No price", "area": 1, "type_id": HOUSE, "district_id": CENTRAL}),
        json!({"title": "Unknown district", "price": 1, "area": 1, "type_id": HOUSE, "district_id": 999}),
        json!({"title": "Unknown feature", "price": 1, "area": 1, "type_id": HOUSE,
               "district_id": CENTRAL, "features": [{"id": 999}]}),
        json!("not an object"),
    ];

    let report = import_records(&store, records).await;
    assert_eq!(
        report,
        ImportReport {
            imported: 1,
            skipped: 4
        }
    );

    let found = SearchEngine::new(store)
        .search(&FilterCriteria::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].listing.title, "Good");
    assert!(found[0].features.is_empty());
}

#[tokio::test]
async fn test_export_of_empty_catalog() {
    let store = seeded_store().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");

    let exported = export_to_file(&SearchEngine::new(store), &path)
        .await
        .unwrap();
    assert_eq!(exported, 0);

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, json!([]));
}
