#![allow(dead_code)]

//! Shared fixtures for integration tests: in-memory database with the
//! production migrations applied, plus entity seeding helpers.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use atelier_server::db::MIGRATOR;
use atelier_server::db::repository::{customer, measurement, order, settings, store};
use shared::models::{
    BodyMetrics, Customer, CustomerCreate, Measurement, MeasurementCreate, OrderCreate,
    OrderDetail, OrderItemInput, Store, StoreCreate,
};

/// Fresh in-memory database with migrations and settings defaults applied.
/// Single connection: every handle must see the same memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");

    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await
        .expect("enable foreign keys");

    MIGRATOR.run(&pool).await.expect("run migrations");
    settings::seed_defaults(&pool).await.expect("seed settings");

    pool
}

pub async fn seed_customer(pool: &SqlitePool, name: &str) -> Customer {
    customer::create(
        pool,
        CustomerCreate {
            name: name.to_string(),
            phone: "+34600111222".to_string(),
            email: None,
            address: None,
            vip_tier: None,
            discount_percent: Some(0.0),
            notes: None,
        },
    )
    .await
    .expect("create customer")
}

pub async fn seed_store(pool: &SqlitePool) -> Store {
    store::create(
        pool,
        StoreCreate {
            name: "Main Atelier".to_string(),
            address: Some("12 Tailor Lane".to_string()),
            phone: None,
        },
    )
    .await
    .expect("create store")
}

/// Order with a single line item priced at `total`, no tax, no discount.
pub async fn seed_order(
    pool: &SqlitePool,
    customer_id: i64,
    store_id: i64,
    total: f64,
) -> OrderDetail {
    seed_order_with_items(
        pool,
        customer_id,
        store_id,
        vec![OrderItemInput {
            inventory_item_id: None,
            measurement_id: None,
            measurement_version_id: None,
            name: "Sherwani".to_string(),
            unit_price: total,
            quantity: 1,
        }],
    )
    .await
}

pub async fn seed_order_with_items(
    pool: &SqlitePool,
    customer_id: i64,
    store_id: i64,
    items: Vec<OrderItemInput>,
) -> OrderDetail {
    order::create(
        pool,
        OrderCreate {
            customer_id,
            store_id,
            employee_id: None,
            status: None,
            due_date: Some("2026-09-01".to_string()),
            notes: None,
            tax_rate_percent: None,
            discount_percent: None,
            items,
        },
    )
    .await
    .expect("create order")
}

pub async fn seed_measurement(
    pool: &SqlitePool,
    customer_id: i64,
    full_length: f64,
) -> Measurement {
    measurement::create(
        pool,
        MeasurementCreate {
            customer_id,
            order_id: None,
            garment_type: "Kurta".to_string(),
            metrics: BodyMetrics {
                full_length: Some(full_length),
                chest: Some(102.0),
                waist: Some(88.0),
                ..BodyMetrics::default()
            },
            notes: None,
            image_urls: Vec::new(),
        },
    )
    .await
    .expect("create measurement")
}
