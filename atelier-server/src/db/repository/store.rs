//! Store Repository
//!
//! Stores support two distinct removal operations: lifecycle deactivation
//! (reversible) and hard delete (only when nothing references the store).

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{LifecycleState, Store, StoreCreate, StoreUpdate};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Store>> {
    let rows = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE state = 'active' ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<Store>> {
    let rows = sqlx::query_as::<_, Store>("SELECT * FROM stores ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Store>> {
    let row = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: StoreCreate) -> RepoResult<Store> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO stores (id, name, address, phone, state, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 'active', ?5, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create store".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: StoreUpdate) -> RepoResult<Store> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE stores SET name = COALESCE(?1, name), address = COALESCE(?2, address), phone = COALESCE(?3, phone), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Store {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Store {id} not found")))
}

/// Move a store between lifecycle states.
pub async fn set_state(pool: &SqlitePool, id: i64, next: LifecycleState) -> RepoResult<Store> {
    let store = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Store {id} not found")))?;
    if !store.state.can_transition_to(next) {
        return Err(RepoError::BusinessRule(format!(
            "Store {id} is already {next}"
        )));
    }
    let now = shared::util::now_millis();
    sqlx::query("UPDATE stores SET state = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(next)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Store {id} not found")))
}

/// Hard delete. Refused while orders, employees or inventory still reference
/// the store; deactivate instead.
pub async fn delete_hard(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referenced = sqlx::query_scalar::<_, i64>(
        "SELECT (SELECT COUNT(*) FROM orders WHERE store_id = ?1) + (SELECT COUNT(*) FROM employees WHERE store_id = ?1) + (SELECT COUNT(*) FROM inventory WHERE store_id = ?1)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if referenced > 0 {
        return Err(RepoError::BusinessRule(format!(
            "Store {id} is still referenced by {referenced} records; deactivate it instead"
        )));
    }
    let rows = sqlx::query("DELETE FROM stores WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
