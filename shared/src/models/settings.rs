//! Display Settings Models
//!
//! Configuration rows keyed by a stable `code` (the wire identifier, matching
//! the corresponding enum). `label`, `color` and ordering are display-only
//! and freely reassignable.

use serde::{Deserialize, Serialize};

/// Display settings for an order status code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatusSetting {
    pub code: String,
    pub label: String,
    pub color: String,
    pub display_order: i64,
}

/// Display settings for a VIP tier code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VipTierSetting {
    pub code: String,
    pub label: String,
    pub color: String,
    /// Default discount applied to new customers of this tier
    pub discount_percent: f64,
    pub display_order: i64,
}

/// Upsert payload for a status setting (code comes from the path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSettingUpsert {
    pub label: String,
    pub color: String,
    pub display_order: i64,
}

/// Upsert payload for a VIP tier setting (code comes from the path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipTierSettingUpsert {
    pub label: String,
    pub color: String,
    pub discount_percent: f64,
    pub display_order: i64,
}
