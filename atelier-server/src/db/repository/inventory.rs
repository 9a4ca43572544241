//! Inventory Repository
//!
//! Inventory items are deactivated, not deleted, in normal flows; order
//! items keep their own denormalized price copies, so price edits here never
//! rewrite history.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{InventoryCreate, InventoryItem, InventoryOverview, InventoryUpdate};

const INVENTORY_OVERVIEW_SELECT: &str = "SELECT id, store_id, name, sku, category, price, cost, quantity, min_stock_level, state, created_at, updated_at, quantity < min_stock_level AS low_stock FROM inventory";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryOverview>> {
    let sql = format!("{INVENTORY_OVERVIEW_SELECT} WHERE state = 'active' ORDER BY name");
    let rows = sqlx::query_as::<_, InventoryOverview>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_low_stock(pool: &SqlitePool) -> RepoResult<Vec<InventoryOverview>> {
    let sql = format!(
        "{INVENTORY_OVERVIEW_SELECT} WHERE state = 'active' AND quantity < min_stock_level ORDER BY name"
    );
    let rows = sqlx::query_as::<_, InventoryOverview>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryItem>> {
    let row = sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: InventoryCreate) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO inventory (id, store_id, name, sku, category, price, cost, quantity, min_stock_level, state, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 'active', ?10, ?10)",
    )
    .bind(id)
    .bind(data.store_id)
    .bind(&data.name)
    .bind(&data.sku)
    .bind(&data.category)
    .bind(data.price)
    .bind(data.cost.unwrap_or(0.0))
    .bind(data.quantity.unwrap_or(0))
    .bind(data.min_stock_level.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: InventoryUpdate) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET store_id = COALESCE(?1, store_id), name = COALESCE(?2, name), sku = COALESCE(?3, sku), category = COALESCE(?4, category), price = COALESCE(?5, price), cost = COALESCE(?6, cost), min_stock_level = COALESCE(?7, min_stock_level), updated_at = ?8 WHERE id = ?9",
    )
    .bind(data.store_id)
    .bind(&data.name)
    .bind(&data.sku)
    .bind(&data.category)
    .bind(data.price)
    .bind(data.cost)
    .bind(data.min_stock_level)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Apply a signed stock adjustment; stock can never go negative.
pub async fn adjust_quantity(pool: &SqlitePool, id: i64, delta: i64) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET quantity = quantity + ?1, updated_at = ?2 WHERE id = ?3 AND quantity + ?1 >= 0",
    )
    .bind(delta)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        let item = find_by_id(pool, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))?;
        return Err(RepoError::BusinessRule(format!(
            "Adjustment {delta} would take inventory item {id} below zero (current {})",
            item.quantity
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Soft delete: deactivate the item.
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory SET state = 'inactive', updated_at = ? WHERE id = ? AND state = 'active'",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
