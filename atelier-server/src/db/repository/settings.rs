//! Display Settings Repository
//!
//! Typed get/list/upsert over the order-status and VIP-tier configuration
//! tables. `code` is the stable wire identifier and must parse into the
//! corresponding enum; label/color/ordering are display-only.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{
    OrderStatus, StatusSetting, StatusSettingUpsert, VipTier, VipTierSetting, VipTierSettingUpsert,
};

pub async fn list_status_settings(pool: &SqlitePool) -> RepoResult<Vec<StatusSetting>> {
    let rows = sqlx::query_as::<_, StatusSetting>(
        "SELECT * FROM order_status_settings ORDER BY display_order",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_status_setting(
    pool: &SqlitePool,
    code: OrderStatus,
) -> RepoResult<Option<StatusSetting>> {
    let row = sqlx::query_as::<_, StatusSetting>("SELECT * FROM order_status_settings WHERE code = ?")
        .bind(code.as_str())
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn upsert_status_setting(
    pool: &SqlitePool,
    code: OrderStatus,
    data: StatusSettingUpsert,
) -> RepoResult<StatusSetting> {
    sqlx::query(
        "INSERT INTO order_status_settings (code, label, color, display_order) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(code) DO UPDATE SET label = ?2, color = ?3, display_order = ?4",
    )
    .bind(code.as_str())
    .bind(&data.label)
    .bind(&data.color)
    .bind(data.display_order)
    .execute(pool)
    .await?;
    get_status_setting(pool, code)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert status setting".into()))
}

pub async fn list_vip_settings(pool: &SqlitePool) -> RepoResult<Vec<VipTierSetting>> {
    let rows = sqlx::query_as::<_, VipTierSetting>(
        "SELECT * FROM vip_tier_settings ORDER BY display_order",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_vip_setting(
    pool: &SqlitePool,
    code: VipTier,
) -> RepoResult<Option<VipTierSetting>> {
    let row = sqlx::query_as::<_, VipTierSetting>("SELECT * FROM vip_tier_settings WHERE code = ?")
        .bind(code.as_str())
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn upsert_vip_setting(
    pool: &SqlitePool,
    code: VipTier,
    data: VipTierSettingUpsert,
) -> RepoResult<VipTierSetting> {
    sqlx::query(
        "INSERT INTO vip_tier_settings (code, label, color, discount_percent, display_order) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(code) DO UPDATE SET label = ?2, color = ?3, discount_percent = ?4, display_order = ?5",
    )
    .bind(code.as_str())
    .bind(&data.label)
    .bind(&data.color)
    .bind(data.discount_percent)
    .bind(data.display_order)
    .execute(pool)
    .await?;
    get_vip_setting(pool, code)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert vip tier setting".into()))
}

/// Default discount for a tier, used when a new customer has no explicit
/// discount set.
pub async fn tier_discount(pool: &SqlitePool, code: VipTier) -> RepoResult<f64> {
    Ok(get_vip_setting(pool, code)
        .await?
        .map(|s| s.discount_percent)
        .unwrap_or(0.0))
}

/// Seed both settings tables with defaults for every enum code. Existing
/// rows are left untouched.
pub async fn seed_defaults(pool: &SqlitePool) -> RepoResult<()> {
    const STATUS_DEFAULTS: &[(&str, &str, &str)] = &[
        ("draft", "Draft", "#9ca3af"),
        ("pending", "Pending", "#f59e0b"),
        ("confirmed", "Confirmed", "#3b82f6"),
        ("in_production", "In Production", "#8b5cf6"),
        ("ready_for_pickup", "Ready for Pickup", "#10b981"),
        ("completed", "Completed", "#22c55e"),
        ("cancelled", "Cancelled", "#ef4444"),
    ];
    for (i, (code, label, color)) in STATUS_DEFAULTS.iter().enumerate() {
        sqlx::query(
            "INSERT OR IGNORE INTO order_status_settings (code, label, color, display_order) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(code)
        .bind(label)
        .bind(color)
        .bind(i as i64)
        .execute(pool)
        .await?;
    }

    const VIP_DEFAULTS: &[(&str, &str, &str, f64)] = &[
        ("regular", "Regular", "#9ca3af", 0.0),
        ("silver", "Silver", "#94a3b8", 5.0),
        ("gold", "Gold", "#eab308", 10.0),
        ("platinum", "Platinum", "#6366f1", 15.0),
    ];
    for (i, (code, label, color, discount)) in VIP_DEFAULTS.iter().enumerate() {
        sqlx::query(
            "INSERT OR IGNORE INTO vip_tier_settings (code, label, color, discount_percent, display_order) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(code)
        .bind(label)
        .bind(color)
        .bind(discount)
        .bind(i as i64)
        .execute(pool)
        .await?;
    }

    Ok(())
}
