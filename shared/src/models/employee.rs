//! Employee Model

use serde::{Deserialize, Serialize};

use super::LifecycleState;

/// Fixed employee role set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum EmployeeRole {
    Admin,
    StoreManager,
    SalesAssociate,
    Tailor,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Admin => "admin",
            EmployeeRole::StoreManager => "store_manager",
            EmployeeRole::SalesAssociate => "sales_associate",
            EmployeeRole::Tailor => "tailor",
        }
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(EmployeeRole::Admin),
            "store_manager" => Ok(EmployeeRole::StoreManager),
            "sales_associate" => Ok(EmployeeRole::SalesAssociate),
            "tailor" => Ok(EmployeeRole::Tailor),
            other => Err(format!("unknown employee role: {other}")),
        }
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub store_id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: EmployeeRole,
    pub state: LifecycleState,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub store_id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: EmployeeRole,
}

/// Update employee payload (partial; lifecycle changes go through the
/// dedicated deactivate/reactivate operations)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub store_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<EmployeeRole>,
}

/// Employee with store name (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeWithStore {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub employee: Employee,
    pub store_name: Option<String>,
}
