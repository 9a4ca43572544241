//! Order Repository
//!
//! Order financial columns (`deposit_amount`, `remaining_balance`) mirror
//! the payment ledger. Every ledger insert re-derives the summary and writes
//! the mirror columns inside the same transaction, so the two can never
//! drift. Status changes are legality-checked against the fixed sequence.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::billing;
use shared::models::{
    Order, OrderCreate, OrderDetail, OrderItem, OrderStatus, OrderUpdate, OrderWithRelations,
    PaymentCreate, PaymentEntry, PaymentKind,
};

const ORDER_WITH_RELATIONS_SELECT: &str = "SELECT o.id, o.order_number, o.customer_id, o.store_id, o.employee_id, o.status, o.subtotal, o.tax_amount, o.discount_amount, o.total_amount, o.deposit_amount, o.remaining_balance, o.is_settled, o.due_date, o.notes, o.created_at, o.updated_at, c.name AS customer_name, c.phone AS customer_phone, c.vip_tier AS customer_vip_tier, s.name AS store_name, e.name AS employee_name FROM orders o JOIN customers c ON o.customer_id = c.id JOIN stores s ON o.store_id = s.id LEFT JOIN employees e ON o.employee_id = e.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderWithRelations>> {
    let sql = format!("{ORDER_WITH_RELATIONS_SELECT} ORDER BY o.created_at DESC");
    let rows = sqlx::query_as::<_, OrderWithRelations>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: OrderStatus,
) -> RepoResult<Vec<OrderWithRelations>> {
    let sql = format!("{ORDER_WITH_RELATIONS_SELECT} WHERE o.status = ? ORDER BY o.created_at DESC");
    let rows = sqlx::query_as::<_, OrderWithRelations>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_with_relations(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<OrderWithRelations>> {
    let sql = format!("{ORDER_WITH_RELATIONS_SELECT} WHERE o.id = ?");
    let row = sqlx::query_as::<_, OrderWithRelations>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_with_relations(pool, id).await? else {
        return Ok(None);
    };
    let items = list_items(pool, id).await?;
    let payments = list_payments(pool, id).await?;
    Ok(Some(OrderDetail {
        order,
        items,
        payments,
    }))
}

pub async fn list_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = ? ORDER BY id")
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_payments(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<PaymentEntry>> {
    let rows = sqlx::query_as::<_, PaymentEntry>(
        "SELECT * FROM payment_history WHERE order_id = ? ORDER BY created_at, id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<OrderDetail> {
    let initial = data.status.unwrap_or(OrderStatus::Draft);
    if !matches!(initial, OrderStatus::Draft | OrderStatus::Pending) {
        return Err(RepoError::Validation(format!(
            "Orders are created as draft or pending, got {initial}"
        )));
    }
    for item in &data.items {
        billing::validate_order_item(item)?;
    }

    let customer = super::customer::find_by_id(pool, data.customer_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", data.customer_id)))?;
    super::store::find_by_id(pool, data.store_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Store {} not found", data.store_id)))?;

    let discount_percent = data.discount_percent.unwrap_or(customer.discount_percent);
    let tax_rate_percent = data.tax_rate_percent.unwrap_or(0.0);
    for (value, field) in [
        (discount_percent, "discount_percent"),
        (tax_rate_percent, "tax_rate_percent"),
    ] {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(RepoError::Validation(format!(
                "{field} must be between 0 and 100, got {value}"
            )));
        }
    }

    let totals = billing::order_totals(&data.items, tax_rate_percent, discount_percent);
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let order_number = format!("ORD-{id}");

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO orders (id, order_number, customer_id, store_id, employee_id, status, subtotal, tax_amount, discount_amount, total_amount, deposit_amount, remaining_balance, is_settled, due_date, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, 0, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&order_number)
    .bind(data.customer_id)
    .bind(data.store_id)
    .bind(data.employee_id)
    .bind(initial)
    .bind(totals.subtotal)
    .bind(totals.tax_amount)
    .bind(totals.discount_amount)
    .bind(totals.total_amount)
    .bind(totals.total_amount)
    .bind(&data.due_date)
    .bind(&data.notes)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &data.items {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, inventory_item_id, measurement_id, measurement_version_id, name, unit_price, quantity, line_total) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(shared::util::snowflake_id())
        .bind(id)
        .bind(item.inventory_item_id)
        .bind(item.measurement_id)
        .bind(item.measurement_version_id)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .bind(billing::line_total(item.unit_price, item.quantity))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_detail(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: OrderUpdate) -> RepoResult<OrderWithRelations> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET employee_id = COALESCE(?1, employee_id), due_date = COALESCE(?2, due_date), notes = COALESCE(?3, notes), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.employee_id)
    .bind(&data.due_date)
    .bind(&data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_with_relations(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Advance an order through the status sequence. Returns the previous
/// status alongside the updated order so the caller can react to the
/// transition (notifications).
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    next: OrderStatus,
) -> RepoResult<(OrderStatus, OrderWithRelations)> {
    let order = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

    if !order.status.can_transition_to(next) {
        return Err(RepoError::BusinessRule(format!(
            "Illegal status transition {} -> {} for order {id}",
            order.status, next
        )));
    }

    let now = shared::util::now_millis();
    // Guard on the observed status so two sessions can't race past the
    // legality check.
    let rows = sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4")
        .bind(next)
        .bind(now)
        .bind(id)
        .bind(order.status)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::BusinessRule(format!(
            "Order {id} was modified concurrently, retry"
        )));
    }

    let updated = find_with_relations(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;
    Ok((order.status, updated))
}

/// Soft cancellation: orders are never removed, only moved to `cancelled`.
pub async fn cancel(pool: &SqlitePool, id: i64) -> RepoResult<OrderWithRelations> {
    let (_, updated) = update_status(pool, id, OrderStatus::Cancelled).await?;
    Ok(updated)
}

/// Mark a cancelled order as financially settled.
pub async fn settle(pool: &SqlitePool, id: i64) -> RepoResult<Order> {
    let order = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;
    if order.status != OrderStatus::Cancelled {
        return Err(RepoError::BusinessRule(format!(
            "Only cancelled orders can be settled, order {id} is {}",
            order.status
        )));
    }
    let now = shared::util::now_millis();
    sqlx::query("UPDATE orders SET is_settled = 1, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Append a ledger entry and rewrite the order's mirror columns from the
/// ledger, all in one transaction. Refunds are capped at the net amount
/// received.
pub async fn record_ledger_entry(
    pool: &SqlitePool,
    order_id: i64,
    data: PaymentCreate,
) -> RepoResult<(PaymentEntry, Order)> {
    let kind: PaymentKind = data
        .payment_type
        .parse()
        .map_err(RepoError::Validation)?;
    billing::validate_amount(data.amount, "amount")?;

    let mut tx = pool.begin().await?;

    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;

    let mut entries = sqlx::query_as::<_, PaymentEntry>(
        "SELECT * FROM payment_history WHERE order_id = ? ORDER BY created_at, id",
    )
    .bind(order_id)
    .fetch_all(&mut *tx)
    .await?;

    if kind == PaymentKind::Refund {
        let cap = billing::max_refundable(&entries);
        if data.amount > cap {
            return Err(RepoError::BusinessRule(format!(
                "Refund {} exceeds amount received {cap}",
                data.amount
            )));
        }
    }

    let now = shared::util::now_millis();
    let entry = PaymentEntry {
        id: shared::util::snowflake_id(),
        order_id,
        payment_type: kind.as_str().to_string(),
        amount: data.amount,
        method: data.method,
        notes: data.notes,
        created_at: now,
    };

    sqlx::query(
        "INSERT INTO payment_history (id, order_id, payment_type, amount, method, notes, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.id)
    .bind(entry.order_id)
    .bind(&entry.payment_type)
    .bind(entry.amount)
    .bind(&entry.method)
    .bind(&entry.notes)
    .bind(entry.created_at)
    .execute(&mut *tx)
    .await?;

    entries.push(entry.clone());
    let summary = billing::summarize(order.total_amount, &entries);

    sqlx::query(
        "UPDATE orders SET deposit_amount = ?1, remaining_balance = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(summary.net_received)
    .bind(summary.remaining_balance)
    .bind(now)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let updated = find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;
    Ok((entry, updated))
}

/// Ledger-derived summary for display; computed on read, never trusted from
/// the cached columns.
pub async fn ledger_summary(pool: &SqlitePool, order_id: i64) -> RepoResult<shared::models::LedgerSummary> {
    let order = find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;
    let entries = list_payments(pool, order_id).await?;
    Ok(billing::summarize(order.total_amount, &entries))
}
