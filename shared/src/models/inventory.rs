//! Inventory Model

use serde::{Deserialize, Serialize};

use super::LifecycleState;

/// Inventory item (fabric, lining, accessories, ready-made stock)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub store_id: Option<i64>,
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub quantity: i64,
    pub min_stock_level: i64,
    pub state: LifecycleState,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryCreate {
    pub store_id: Option<i64>,
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub quantity: Option<i64>,
    pub min_stock_level: Option<i64>,
}

/// Update inventory item payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub store_id: Option<i64>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub min_stock_level: Option<i64>,
}

/// Signed stock adjustment (receiving is positive, consumption negative)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityAdjust {
    pub delta: i64,
    pub reason: Option<String>,
}

/// Inventory item with derived stock flag (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryOverview {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub item: InventoryItem,
    pub low_stock: bool,
}
