//! Customer Repository
//!
//! Customers are the root of the cascade-delete subtree:
//! Customer → Orders → {Order Items, Payments}, Customer → Measurements →
//! Measurement Versions. The cascade runs as one transaction.

use serde::Serialize;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate, CustomerWithStats, VipTier};

const CUSTOMER_WITH_STATS_SELECT: &str = "SELECT c.id, c.name, c.phone, c.email, c.address, c.vip_tier, c.discount_percent, c.notes, c.created_at, c.updated_at, COUNT(o.id) AS order_count, COALESCE(SUM(o.total_amount), 0.0) AS lifetime_spent FROM customers c LEFT JOIN orders o ON o.customer_id = c.id AND o.status != 'cancelled'";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<CustomerWithStats>> {
    let sql = format!("{CUSTOMER_WITH_STATS_SELECT} GROUP BY c.id ORDER BY c.created_at DESC");
    let rows = sqlx::query_as::<_, CustomerWithStats>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let row = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<CustomerWithStats>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{CUSTOMER_WITH_STATS_SELECT} WHERE c.name LIKE ?1 OR c.phone LIKE ?1 GROUP BY c.id ORDER BY c.created_at DESC"
    );
    let rows = sqlx::query_as::<_, CustomerWithStats>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let vip_tier = data.vip_tier.unwrap_or(VipTier::Regular);

    // Default discount comes from the tier settings
    let discount_percent = match data.discount_percent {
        Some(d) => d,
        None => super::settings::tier_discount(pool, vip_tier).await?,
    };

    sqlx::query(
        "INSERT INTO customers (id, name, phone, email, address, vip_tier, discount_percent, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.address)
    .bind(vip_tier)
    .bind(discount_percent)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customers SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), email = COALESCE(?3, email), address = COALESCE(?4, address), vip_tier = COALESCE(?5, vip_tier), discount_percent = COALESCE(?6, discount_percent), notes = COALESCE(?7, notes), updated_at = ?8 WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.address)
    .bind(data.vip_tier)
    .bind(data.discount_percent)
    .bind(&data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// Row counts removed by a cascade delete
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CascadeReport {
    pub orders: u64,
    pub order_items: u64,
    pub payments: u64,
    pub measurements: u64,
    pub measurement_versions: u64,
}

/// Hard-delete a customer together with every dependent row. Single
/// transaction: either the whole subtree goes, or nothing does.
pub async fn delete_cascade(pool: &SqlitePool, id: i64) -> RepoResult<CascadeReport> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if exists == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }

    // Leaf tables first so foreign keys stay satisfied throughout
    let order_items = sqlx::query(
        "DELETE FROM order_items WHERE order_id IN (SELECT id FROM orders WHERE customer_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let payments = sqlx::query(
        "DELETE FROM payment_history WHERE order_id IN (SELECT id FROM orders WHERE customer_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let measurement_versions = sqlx::query(
        "DELETE FROM measurement_versions WHERE measurement_id IN (SELECT id FROM measurements WHERE customer_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let measurements = sqlx::query("DELETE FROM measurements WHERE customer_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let orders = sqlx::query("DELETE FROM orders WHERE customer_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(CascadeReport {
        orders,
        order_items,
        payments,
        measurements,
        measurement_versions,
    })
}
