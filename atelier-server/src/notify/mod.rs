//! Status-Transition Notifier
//!
//! Sends customer-facing messages when an order reaches `in_production`,
//! `ready_for_pickup` or `completed`. Strictly best-effort: dispatch happens
//! on a spawned task after the status write commits, failures are logged and
//! swallowed, and the triggering mutation is never blocked or rolled back.

pub mod client;
pub mod templates;

use crate::core::Config;
use client::WhatsAppClient;
use shared::models::{OrderStatus, OrderWithRelations, Store};
pub use templates::NotificationKind;

/// Object graph a parameter builder can draw from
#[derive(Debug, Clone)]
pub struct NotificationContext {
    pub order: OrderWithRelations,
    pub store: Option<Store>,
}

/// Outbound notifier. Disabled (all dispatches become no-ops) when no proxy
/// URL is configured. Cloning is cheap: the HTTP client is reference-counted.
#[derive(Clone)]
pub struct Notifier {
    client: Option<WhatsAppClient>,
    language: String,
}

impl Notifier {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: config
                .whatsapp_api_url
                .as_deref()
                .map(WhatsAppClient::new),
            language: config.whatsapp_language.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Fire-and-forget dispatch for a committed status transition. Returns
    /// immediately; the send happens on a background task.
    pub fn notify_status_change(&self, previous: OrderStatus, ctx: NotificationContext) {
        let Some(kind) = NotificationKind::for_transition(ctx.order.order.status) else {
            return;
        };
        if self.client.is_none() {
            tracing::debug!(
                order = %ctx.order.order.order_number,
                from = %previous,
                to = %ctx.order.order.status,
                "Notifier disabled, skipping {kind:?}"
            );
            return;
        }

        let notifier = self.clone();
        tokio::spawn(async move {
            let order_number = ctx.order.order.order_number.clone();
            if let Err(e) = notifier.send(kind, &ctx).await {
                tracing::warn!(
                    order = %order_number,
                    template = kind.template_name(),
                    error = %e,
                    "Failed to send status notification"
                );
            } else {
                tracing::info!(
                    order = %order_number,
                    template = kind.template_name(),
                    "Status notification sent"
                );
            }
        });
    }

    async fn send(&self, kind: NotificationKind, ctx: &NotificationContext) -> anyhow::Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("notifier disabled"))?;
        let params = kind.build_params(ctx);
        client
            .send_template(
                &ctx.order.customer_phone,
                kind.template_name(),
                &self.language,
                params,
            )
            .await
    }
}
