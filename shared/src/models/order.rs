//! Order Model
//!
//! Orders advance through a fixed status sequence. Financial fields
//! (`deposit_amount`, `remaining_balance`) mirror the payment ledger and are
//! rewritten inside the same transaction as every ledger insert, so they
//! cannot drift from the ledger-derived values.

use serde::{Deserialize, Serialize};

use super::{PaymentEntry, VipTier};

/// Order status state machine.
///
/// Forward sequence:
/// `draft → pending → confirmed → in_production → ready_for_pickup → completed`.
/// `cancelled` is reachable from any non-terminal status. `completed` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Draft,
    Pending,
    Confirmed,
    InProduction,
    ReadyForPickup,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProduction => "in_production",
            OrderStatus::ReadyForPickup => "ready_for_pickup",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Draft,
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProduction,
        OrderStatus::ReadyForPickup,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        if *self == next || self.is_terminal() {
            return false;
        }
        match (*self, next) {
            (_, Cancelled) => true,
            (Draft, Pending) => true,
            (Pending, Confirmed) => true,
            (Confirmed, InProduction) => true,
            (InProduction, ReadyForPickup) => true,
            (ReadyForPickup, Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub customer_id: i64,
    pub store_id: i64,
    pub employee_id: Option<i64>,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    /// Running total received (payments minus refunds), ledger-derived
    pub deposit_amount: f64,
    /// `max(0, total_amount - deposit_amount)`, ledger-derived
    pub remaining_balance: f64,
    /// Only meaningful once cancelled: outstanding money was reconciled
    pub is_settled: bool,
    /// ISO date (YYYY-MM-DD)
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item. Prices are denormalized copies taken at order time, not
/// live references to inventory. `measurement_version_id` pins the exact
/// snapshot the garment was cut against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub inventory_item_id: Option<i64>,
    pub measurement_id: Option<i64>,
    pub measurement_version_id: Option<i64>,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Line item input for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub inventory_item_id: Option<i64>,
    pub measurement_id: Option<i64>,
    pub measurement_version_id: Option<i64>,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: i64,
    pub store_id: i64,
    pub employee_id: Option<i64>,
    /// Initial status; only `draft` or `pending` are accepted
    pub status: Option<OrderStatus>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    /// Tax rate in percent, applied to the discounted subtotal
    pub tax_rate_percent: Option<f64>,
    /// Discount in percent; defaults to the customer's VIP discount
    pub discount_percent: Option<f64>,
    pub items: Vec<OrderItemInput>,
}

/// Update order payload (partial; status changes go through the dedicated
/// status endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub employee_id: Option<i64>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Order joined with shallow foreign relations (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderWithRelations {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub order: Order,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_vip_tier: VipTier,
    pub store_name: String,
    pub employee_name: Option<String>,
}

/// Full order detail (order + items + payment ledger)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderWithRelations,
    pub items: Vec<OrderItem>,
    pub payments: Vec<PaymentEntry>,
}
