//! Customer Model

use serde::{Deserialize, Serialize};

/// VIP tier codes. Labels, colors and discount defaults live in
/// `vip_tier_settings` and are display-only; the code is the stable
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum VipTier {
    Regular,
    Silver,
    Gold,
    Platinum,
}

impl VipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            VipTier::Regular => "regular",
            VipTier::Silver => "silver",
            VipTier::Gold => "gold",
            VipTier::Platinum => "platinum",
        }
    }

    pub const ALL: [VipTier; 4] = [
        VipTier::Regular,
        VipTier::Silver,
        VipTier::Gold,
        VipTier::Platinum,
    ];
}

impl std::fmt::Display for VipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(VipTier::Regular),
            "silver" => Ok(VipTier::Silver),
            "gold" => Ok(VipTier::Gold),
            "platinum" => Ok(VipTier::Platinum),
            other => Err(format!("unknown vip tier: {other}")),
        }
    }
}

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub vip_tier: VipTier,
    pub discount_percent: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub vip_tier: Option<VipTier>,
    pub discount_percent: Option<f64>,
    pub notes: Option<String>,
}

/// Update customer payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub vip_tier: Option<VipTier>,
    pub discount_percent: Option<f64>,
    pub notes: Option<String>,
}

/// Customer with order stats (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerWithStats {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub customer: Customer,
    pub order_count: i64,
    pub lifetime_spent: f64,
}
