//! Measurement versioning engine: every edit snapshots the pre-edit values,
//! version numbers stay monotonic across pruning, retention keeps the most
//! recent N, and pinned versions survive.

mod common;

use atelier_server::db::repository::measurement;
use shared::models::{BodyMetrics, MeasurementUpdate, OrderItemInput};

const CAP: u32 = 3;

fn edit(full_length: f64) -> MeasurementUpdate {
    MeasurementUpdate {
        order_id: None,
        garment_type: None,
        metrics: BodyMetrics {
            full_length: Some(full_length),
            chest: Some(102.0),
            waist: Some(88.0),
            ..BodyMetrics::default()
        },
        notes: None,
        image_urls: None,
    }
}

#[tokio::test]
async fn edit_snapshots_pre_edit_values() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let m = common::seed_measurement(&pool, customer.id, 40.0).await;

    let updated = measurement::update(&pool, m.id, edit(42.0), CAP)
        .await
        .expect("versioned update");
    assert_eq!(updated.metrics.full_length, Some(42.0));

    let versions = measurement::list_versions(&pool, m.id).await.expect("versions");
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version_number, 1);
    assert_eq!(versions[0].metrics.full_length, Some(40.0));
    assert_eq!(versions[0].garment_type, "Kurta");
}

#[tokio::test]
async fn version_numbers_stay_monotonic_across_pruning() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let m = common::seed_measurement(&pool, customer.id, 40.0).await;

    for i in 0..6 {
        measurement::update(&pool, m.id, edit(41.0 + i as f64), CAP)
            .await
            .expect("versioned update");
    }

    let versions = measurement::list_versions(&pool, m.id).await.expect("versions");
    assert_eq!(versions.len() as u32, CAP);
    // Most recent N by version number, newest first, numbers never reused
    let numbers: Vec<i64> = versions.iter().map(|v| v.version_number).collect();
    assert_eq!(numbers, vec![6, 5, 4]);

    // A further edit continues the sequence instead of reusing pruned numbers
    measurement::update(&pool, m.id, edit(50.0), CAP)
        .await
        .expect("versioned update");
    let versions = measurement::list_versions(&pool, m.id).await.expect("versions");
    assert_eq!(versions[0].version_number, 7);
}

#[tokio::test]
async fn retention_never_exceeds_cap() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let m = common::seed_measurement(&pool, customer.id, 40.0).await;

    for i in 0..10 {
        measurement::update(&pool, m.id, edit(41.0 + i as f64), CAP)
            .await
            .expect("versioned update");
        let count = measurement::version_count(&pool, m.id).await.expect("count");
        assert!(count as u32 <= CAP, "version count {count} exceeds cap {CAP}");
    }
}

#[tokio::test]
async fn versions_pinned_by_order_items_survive_pruning() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let m = common::seed_measurement(&pool, customer.id, 40.0).await;

    // First edit creates version 1, which an order item then pins
    measurement::update(&pool, m.id, edit(42.0), CAP)
        .await
        .expect("versioned update");
    let pinned = measurement::list_versions(&pool, m.id).await.expect("versions")[0].clone();
    assert_eq!(pinned.version_number, 1);

    common::seed_order_with_items(
        &pool,
        customer.id,
        store.id,
        vec![OrderItemInput {
            inventory_item_id: None,
            measurement_id: Some(m.id),
            measurement_version_id: Some(pinned.id),
            name: "Kurta".to_string(),
            unit_price: 800.0,
            quantity: 1,
        }],
    )
    .await;

    // Edit far past the cap; the pinned snapshot must still be there
    for i in 0..6 {
        measurement::update(&pool, m.id, edit(43.0 + i as f64), CAP)
            .await
            .expect("versioned update");
    }

    let versions = measurement::list_versions(&pool, m.id).await.expect("versions");
    assert!(
        versions.iter().any(|v| v.id == pinned.id),
        "pinned version was pruned"
    );
    // The pinned snapshot still shows the original values
    let kept = versions.iter().find(|v| v.id == pinned.id).unwrap();
    assert_eq!(kept.metrics.full_length, Some(40.0));
}

#[tokio::test]
async fn metrics_are_replaced_wholesale_on_update() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let m = common::seed_measurement(&pool, customer.id, 40.0).await;
    assert_eq!(m.metrics.waist, Some(88.0));

    // Edit posts a metric set without waist: the live row drops it
    let updated = measurement::update(
        &pool,
        m.id,
        MeasurementUpdate {
            order_id: None,
            garment_type: None,
            metrics: BodyMetrics {
                chest: Some(104.0),
                ..BodyMetrics::default()
            },
            notes: None,
            image_urls: None,
        },
        CAP,
    )
    .await
    .expect("versioned update");
    assert_eq!(updated.metrics.chest, Some(104.0));
    assert_eq!(updated.metrics.waist, None);

    // The snapshot still holds the pre-edit waist
    let versions = measurement::list_versions(&pool, m.id).await.expect("versions");
    assert_eq!(versions[0].metrics.waist, Some(88.0));
}

#[tokio::test]
async fn updating_missing_measurement_fails_cleanly() {
    let pool = common::test_pool().await;
    let err = measurement::update(&pool, 424242, edit(42.0), CAP)
        .await
        .expect_err("missing measurement");
    assert!(matches!(
        err,
        atelier_server::db::repository::RepoError::NotFound(_)
    ));
}
