//! Order API Handlers
//!
//! Status changes go through the dedicated endpoint so the transition is
//! legality-checked and, for the customer-facing ones, the notifier fires
//! after the write commits. DELETE never removes an order; it cancels it.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{order, store};
use crate::notify::{NotificationContext, NotificationKind};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};
use shared::models::{
    LedgerSummary, Order, OrderCreate, OrderDetail, OrderStatus, OrderStatusUpdate, OrderUpdate,
    OrderWithRelations, PaymentCreate, PaymentEntry,
};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - list orders joined with customer/store/employee
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderWithRelations>>> {
    let orders = match query.status {
        Some(status) => order::find_by_status(&state.pool, status).await?,
        None => order::find_all(&state.pool).await?,
    };
    Ok(Json(orders))
}

/// GET /api/orders/:id - full detail (items + payment ledger)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(detail))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let detail = order::create(&state.pool, payload).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderWithRelations>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let updated = order::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// PUT /api/orders/:id/status - advance the status state machine
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderWithRelations>> {
    let (previous, updated) = order::update_status(&state.pool, id, payload.status).await?;

    dispatch_notification(&state, previous, &updated).await;

    Ok(Json(updated))
}

/// DELETE /api/orders/:id - soft cancellation
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithRelations>> {
    let cancelled = order::cancel(&state.pool, id).await?;
    Ok(Json(cancelled))
}

/// POST /api/orders/:id/settle - reconcile a cancelled order
pub async fn settle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let settled = order::settle(&state.pool, id).await?;
    Ok(Json(settled))
}

/// GET /api/orders/:id/summary - ledger-derived figures, computed on read
pub async fn summary(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LedgerSummary>> {
    let summary = order::ledger_summary(&state.pool, id).await?;
    Ok(Json(summary))
}

/// GET /api/orders/:id/payments
pub async fn list_payments(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<PaymentEntry>>> {
    let payments = order::list_payments(&state.pool, id).await?;
    Ok(Json(payments))
}

/// Ledger entry plus the order with its refreshed mirror columns
#[derive(Serialize)]
pub struct PaymentRecorded {
    pub entry: PaymentEntry,
    pub order: Order,
}

/// POST /api/orders/:id/payments - record a payment or refund
pub async fn record_payment(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<PaymentRecorded>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let (entry, order) = order::record_ledger_entry(&state.pool, id, payload).await?;
    Ok(Json(PaymentRecorded { entry, order }))
}

/// Fire the status notifier for customer-facing transitions. Best-effort:
/// any failure here is logged inside the notifier and never surfaces.
async fn dispatch_notification(
    state: &ServerState,
    previous: OrderStatus,
    updated: &OrderWithRelations,
) {
    if NotificationKind::for_transition(updated.order.status).is_none() {
        return;
    }
    let store = store::find_by_id(&state.pool, updated.order.store_id)
        .await
        .ok()
        .flatten();
    state.notifier.notify_status_change(
        previous,
        NotificationContext {
            order: updated.clone(),
            store,
        },
    );
}
