//! Notification templates
//!
//! One tagged variant per outbound template, each with a statically-typed
//! parameter builder over the order/customer/store graph. Unresolved or
//! empty values render as `"-"` so the template's placeholder count always
//! lines up.

use super::NotificationContext;
use shared::models::OrderStatus;

/// Outbound template kinds, keyed by the status an order just reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Work on the garment has started
    WorkStarted,
    /// Garment is ready for pickup
    ReadyForPickup,
    /// Order complete, ask for feedback
    FeedbackRequest,
}

impl NotificationKind {
    /// Map a freshly-reached status to its template, if any. Only the three
    /// customer-facing transitions notify; everything else stays silent.
    pub fn for_transition(next: OrderStatus) -> Option<Self> {
        match next {
            OrderStatus::InProduction => Some(NotificationKind::WorkStarted),
            OrderStatus::ReadyForPickup => Some(NotificationKind::ReadyForPickup),
            OrderStatus::Completed => Some(NotificationKind::FeedbackRequest),
            _ => None,
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            NotificationKind::WorkStarted => "order_work_started",
            NotificationKind::ReadyForPickup => "order_ready_for_pickup",
            NotificationKind::FeedbackRequest => "order_feedback_request",
        }
    }

    /// Number of body parameters the template expects.
    pub fn param_count(&self) -> usize {
        match self {
            NotificationKind::WorkStarted => 3,
            NotificationKind::ReadyForPickup => 5,
            NotificationKind::FeedbackRequest => 3,
        }
    }

    /// Build the body parameter list for this template.
    pub fn build_params(&self, ctx: &NotificationContext) -> Vec<String> {
        let order = &ctx.order;
        match self {
            NotificationKind::WorkStarted => vec![
                text_param(Some(&order.customer_name)),
                text_param(Some(&order.order.order_number)),
                text_param(order.order.due_date.as_deref()),
            ],
            NotificationKind::ReadyForPickup => vec![
                text_param(Some(&order.customer_name)),
                text_param(Some(&order.order.order_number)),
                text_param(Some(&order.store_name)),
                text_param(ctx.store.as_ref().and_then(|s| s.address.as_deref())),
                money_param(order.order.remaining_balance),
            ],
            NotificationKind::FeedbackRequest => vec![
                text_param(Some(&order.customer_name)),
                text_param(Some(&order.order.order_number)),
                text_param(Some(&order.store_name)),
            ],
        }
    }
}

/// A text parameter; missing or empty values render as `"-"`.
fn text_param(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => "-".to_string(),
    }
}

fn money_param(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Order, OrderWithRelations, VipTier};

    fn context(due_date: Option<&str>) -> NotificationContext {
        NotificationContext {
            order: OrderWithRelations {
                order: Order {
                    id: 1,
                    order_number: "ORD-1".to_string(),
                    customer_id: 1,
                    store_id: 1,
                    employee_id: None,
                    status: OrderStatus::InProduction,
                    subtotal: 1000.0,
                    tax_amount: 0.0,
                    discount_amount: 0.0,
                    total_amount: 1000.0,
                    deposit_amount: 400.0,
                    remaining_balance: 600.0,
                    is_settled: false,
                    due_date: due_date.map(String::from),
                    notes: None,
                    created_at: 0,
                    updated_at: 0,
                },
                customer_name: "Fatima".to_string(),
                customer_phone: "+34600111222".to_string(),
                customer_vip_tier: VipTier::Gold,
                store_name: "Main Atelier".to_string(),
                employee_name: None,
            },
            store: None,
        }
    }

    #[test]
    fn only_three_statuses_notify() {
        assert_eq!(
            NotificationKind::for_transition(OrderStatus::InProduction),
            Some(NotificationKind::WorkStarted)
        );
        assert_eq!(
            NotificationKind::for_transition(OrderStatus::ReadyForPickup),
            Some(NotificationKind::ReadyForPickup)
        );
        assert_eq!(
            NotificationKind::for_transition(OrderStatus::Completed),
            Some(NotificationKind::FeedbackRequest)
        );
        for status in [
            OrderStatus::Draft,
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(NotificationKind::for_transition(status), None);
        }
    }

    #[test]
    fn param_lists_match_expected_counts() {
        let ctx = context(Some("2026-09-01"));
        for kind in [
            NotificationKind::WorkStarted,
            NotificationKind::ReadyForPickup,
            NotificationKind::FeedbackRequest,
        ] {
            assert_eq!(kind.build_params(&ctx).len(), kind.param_count());
        }
    }

    #[test]
    fn missing_values_render_as_dash() {
        let ctx = context(None);
        let params = NotificationKind::WorkStarted.build_params(&ctx);
        assert_eq!(params, vec!["Fatima", "ORD-1", "-"]);

        // No store row loaded: the address slot falls back to '-'
        let params = NotificationKind::ReadyForPickup.build_params(&ctx);
        assert_eq!(params[3], "-");
        assert_eq!(params[4], "600.00");
    }
}
