//! Customer cascade delete: removing a customer leaves zero dependent rows
//! in orders, order_items, payment_history, measurements and
//! measurement_versions, without touching other customers' data.

mod common;

use atelier_server::db::repository::{RepoError, customer, measurement, order};
use shared::models::{BodyMetrics, MeasurementUpdate, OrderItemInput, PaymentCreate};
use sqlx::SqlitePool;

async fn count(pool: &SqlitePool, sql: &str, id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("count query")
}

#[tokio::test]
async fn cascade_removes_the_whole_subtree() {
    let pool = common::test_pool().await;
    let customer_row = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;

    // Measurement with one version
    let m = common::seed_measurement(&pool, customer_row.id, 40.0).await;
    measurement::update(
        &pool,
        m.id,
        MeasurementUpdate {
            order_id: None,
            garment_type: None,
            metrics: BodyMetrics {
                full_length: Some(42.0),
                ..BodyMetrics::default()
            },
            notes: None,
            image_urls: None,
        },
        10,
    )
    .await
    .expect("versioned update");

    // Order with two items and a payment
    let detail = common::seed_order_with_items(
        &pool,
        customer_row.id,
        store.id,
        vec![
            OrderItemInput {
                inventory_item_id: None,
                measurement_id: Some(m.id),
                measurement_version_id: None,
                name: "Kurta".to_string(),
                unit_price: 800.0,
                quantity: 1,
            },
            OrderItemInput {
                inventory_item_id: None,
                measurement_id: None,
                measurement_version_id: None,
                name: "Alteration".to_string(),
                unit_price: 100.0,
                quantity: 2,
            },
        ],
    )
    .await;
    order::record_ledger_entry(
        &pool,
        detail.order.order.id,
        PaymentCreate {
            payment_type: "payment".to_string(),
            amount: 300.0,
            method: None,
            notes: None,
        },
    )
    .await
    .expect("record payment");

    let report = customer::delete_cascade(&pool, customer_row.id)
        .await
        .expect("cascade delete");
    assert_eq!(report.orders, 1);
    assert_eq!(report.order_items, 2);
    assert_eq!(report.payments, 1);
    assert_eq!(report.measurements, 1);
    assert_eq!(report.measurement_versions, 1);

    let cid = customer_row.id;
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM customers WHERE id = ?", cid).await, 0);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM orders WHERE customer_id = ?", cid).await,
        0
    );
    assert_eq!(
        count(
            &pool,
            "SELECT COUNT(*) FROM order_items WHERE order_id IN (SELECT id FROM orders WHERE customer_id = ?)",
            cid
        )
        .await,
        0
    );
    assert_eq!(
        count(
            &pool,
            "SELECT COUNT(*) FROM payment_history WHERE order_id IN (SELECT id FROM orders WHERE customer_id = ?)",
            cid
        )
        .await,
        0
    );
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM measurements WHERE customer_id = ?", cid).await,
        0
    );
    assert_eq!(
        count(
            &pool,
            "SELECT COUNT(*) FROM measurement_versions WHERE measurement_id IN (SELECT id FROM measurements WHERE customer_id = ?)",
            cid
        )
        .await,
        0
    );
}

#[tokio::test]
async fn cascade_leaves_other_customers_untouched() {
    let pool = common::test_pool().await;
    let doomed = common::seed_customer(&pool, "Fatima").await;
    let kept = common::seed_customer(&pool, "Aisha").await;
    let store = common::seed_store(&pool).await;

    common::seed_order(&pool, doomed.id, store.id, 500.0).await;
    common::seed_order(&pool, kept.id, store.id, 900.0).await;
    common::seed_measurement(&pool, kept.id, 38.0).await;

    customer::delete_cascade(&pool, doomed.id)
        .await
        .expect("cascade delete");

    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM orders WHERE customer_id = ?", kept.id).await,
        1
    );
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM measurements WHERE customer_id = ?", kept.id).await,
        1
    );
    assert!(customer::find_by_id(&pool, kept.id).await.unwrap().is_some());
}

#[tokio::test]
async fn cascade_on_missing_customer_fails() {
    let pool = common::test_pool().await;
    let err = customer::delete_cascade(&pool, 999_999)
        .await
        .expect_err("missing customer");
    assert!(matches!(err, RepoError::NotFound(_)));
}
