//! Store Model

use serde::{Deserialize, Serialize};

use super::LifecycleState;

/// Store entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub state: LifecycleState,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Update store payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}
