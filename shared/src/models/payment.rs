//! Payment Ledger Model
//!
//! `payment_type` is stored as an open string column; the known set is
//! validated at the API boundary. Amounts are always positive, direction is
//! inferred from the type.

use serde::{Deserialize, Serialize};

/// Known payment ledger entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Payment,
    Refund,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Payment => "payment",
            PaymentKind::Refund => "refund",
        }
    }
}

impl std::str::FromStr for PaymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(PaymentKind::Payment),
            "refund" => Ok(PaymentKind::Refund),
            other => Err(format!("unknown payment type: {other}")),
        }
    }
}

/// Payment ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentEntry {
    pub id: i64,
    pub order_id: i64,
    pub payment_type: String,
    /// Always positive; sign comes from `payment_type`
    pub amount: f64,
    pub method: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Record a payment or refund against an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub payment_type: String,
    pub amount: f64,
    pub method: Option<String>,
    pub notes: Option<String>,
}

/// Ledger-derived financial summary for an order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub net_received: f64,
    pub remaining_balance: f64,
}
