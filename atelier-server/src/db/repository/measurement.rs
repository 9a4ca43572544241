//! Measurement Repository
//!
//! Every update snapshots the pre-update row into `measurement_versions`
//! before applying the new values, inside one transaction: a failed snapshot
//! rolls the whole edit back, so a plain overwrite can never happen.
//!
//! Version numbers come from the `next_version` counter on the live row, so
//! they keep increasing monotonically even after old versions are pruned.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Measurement, MeasurementCreate, MeasurementDetail, MeasurementUpdate, MeasurementVersion};

const METRIC_COLUMNS: &str = "chest, waist, hip, shoulder_width, sleeve_length, full_length, neck, armhole, bicep, wrist, front_length, back_length, cross_back, trouser_waist, trouser_length, inseam, thigh, knee, calf, bottom_width";

fn bind_metrics<'q>(
    q: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    m: &shared::models::BodyMetrics,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    q.bind(m.chest)
        .bind(m.waist)
        .bind(m.hip)
        .bind(m.shoulder_width)
        .bind(m.sleeve_length)
        .bind(m.full_length)
        .bind(m.neck)
        .bind(m.armhole)
        .bind(m.bicep)
        .bind(m.wrist)
        .bind(m.front_length)
        .bind(m.back_length)
        .bind(m.cross_back)
        .bind(m.trouser_waist)
        .bind(m.trouser_length)
        .bind(m.inseam)
        .bind(m.thigh)
        .bind(m.knee)
        .bind(m.calf)
        .bind(m.bottom_width)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Measurement>> {
    let rows = sqlx::query_as::<_, Measurement>("SELECT * FROM measurements ORDER BY updated_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Measurement>> {
    let rows = sqlx::query_as::<_, Measurement>(
        "SELECT * FROM measurements WHERE customer_id = ? ORDER BY updated_at DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Measurement>> {
    let row = sqlx::query_as::<_, Measurement>("SELECT * FROM measurements WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<MeasurementDetail>> {
    let Some(measurement) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let versions = list_versions(pool, id).await?;
    Ok(Some(MeasurementDetail {
        measurement,
        versions,
    }))
}

pub async fn list_versions(pool: &SqlitePool, measurement_id: i64) -> RepoResult<Vec<MeasurementVersion>> {
    let rows = sqlx::query_as::<_, MeasurementVersion>(
        "SELECT * FROM measurement_versions WHERE measurement_id = ? ORDER BY version_number DESC",
    )
    .bind(measurement_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn version_count(pool: &SqlitePool, measurement_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM measurement_versions WHERE measurement_id = ?",
    )
    .bind(measurement_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: MeasurementCreate) -> RepoResult<Measurement> {
    let customer = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE id = ?")
        .bind(data.customer_id)
        .fetch_one(pool)
        .await?;
    if customer == 0 {
        return Err(RepoError::NotFound(format!(
            "Customer {} not found",
            data.customer_id
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let image_urls = serde_json::to_string(&data.image_urls).unwrap_or_else(|_| "[]".into());

    let placeholders = "?, ".repeat(19) + "?";
    let sql = format!(
        "INSERT INTO measurements (id, customer_id, order_id, garment_type, {METRIC_COLUMNS}, notes, image_urls, next_version, created_at, updated_at) VALUES (?, ?, ?, ?, {placeholders}, ?, ?, 1, ?, ?)"
    );
    let q = sqlx::query(&sql)
        .bind(id)
        .bind(data.customer_id)
        .bind(data.order_id)
        .bind(&data.garment_type);
    bind_metrics(q, &data.metrics)
        .bind(&data.notes)
        .bind(&image_urls)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create measurement".into()))
}

/// Versioned update: snapshot the current row, apply the new values, prune
/// history beyond the retention cap. One transaction; the snapshot failing
/// aborts the edit.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: MeasurementUpdate,
    retention_cap: u32,
) -> RepoResult<Measurement> {
    let now = shared::util::now_millis();
    let version_id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;

    // 1. Snapshot pre-update values, consuming the version counter
    let snapshot_sql = format!(
        "INSERT INTO measurement_versions (id, measurement_id, version_number, garment_type, {METRIC_COLUMNS}, notes, image_urls, created_at) SELECT ?, id, next_version, garment_type, {METRIC_COLUMNS}, notes, image_urls, ? FROM measurements WHERE id = ?"
    );
    let snapshot = sqlx::query(&snapshot_sql)
        .bind(version_id)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if snapshot.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Measurement {id} not found")));
    }

    // 2. Apply the update. Metrics are replaced wholesale (the edit form
    //    posts the complete set); the remaining fields keep COALESCE
    //    semantics.
    let metric_assignments: Vec<String> = METRIC_COLUMNS
        .split(", ")
        .map(|c| format!("{c} = ?"))
        .collect();
    let update_sql = format!(
        "UPDATE measurements SET next_version = next_version + 1, order_id = COALESCE(?, order_id), garment_type = COALESCE(?, garment_type), {}, notes = COALESCE(?, notes), image_urls = COALESCE(?, image_urls), updated_at = ? WHERE id = ?",
        metric_assignments.join(", ")
    );
    let image_urls = data
        .image_urls
        .as_ref()
        .map(|v| serde_json::to_string(v).unwrap_or_else(|_| "[]".into()));
    let q = sqlx::query(&update_sql)
        .bind(data.order_id)
        .bind(&data.garment_type);
    bind_metrics(q, &data.metrics)
        .bind(&data.notes)
        .bind(&image_urls)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // 3. Prune history beyond the cap, newest first. Versions pinned by an
    //    order item are never pruned.
    sqlx::query(
        "DELETE FROM measurement_versions WHERE measurement_id = ?1 AND version_number NOT IN (SELECT version_number FROM measurement_versions WHERE measurement_id = ?1 ORDER BY version_number DESC LIMIT ?2) AND id NOT IN (SELECT measurement_version_id FROM order_items WHERE measurement_version_id IS NOT NULL)",
    )
    .bind(id)
    .bind(i64::from(retention_cap))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Measurement {id} not found")))
}

/// Hard delete a measurement and its versions. Refused while an order item
/// references the profile or any of its versions.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referenced = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM order_items WHERE measurement_id = ?1 OR measurement_version_id IN (SELECT id FROM measurement_versions WHERE measurement_id = ?1)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if referenced > 0 {
        return Err(RepoError::BusinessRule(format!(
            "Measurement {id} is referenced by {referenced} order items"
        )));
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM measurement_versions WHERE measurement_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM measurements WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(rows.rows_affected() > 0)
}
