//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic goes through `Decimal` internally, then converts
//! back to `f64` for storage/serialization. The ledger summary here is the
//! single source of truth for an order's received/remaining figures: the
//! cached columns on the order row are always rewritten from this result,
//! inside the same transaction as the ledger insert.

use rust_decimal::prelude::*;

use crate::db::repository::RepoError;
use shared::models::{LedgerSummary, OrderItemInput, PaymentEntry, PaymentKind};

/// Rounding: 2 decimal places, half-up
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed amount per ledger entry or line item
const MAX_AMOUNT: f64 = 1_000_000.0;

/// Maximum allowed quantity per line item
const MAX_QUANTITY: i64 = 9999;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}

#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a ledger amount: finite, strictly positive, bounded.
pub fn validate_amount(amount: f64, field: &str) -> Result<(), RepoError> {
    if !amount.is_finite() {
        return Err(RepoError::Validation(format!(
            "{field} must be a finite number, got {amount}"
        )));
    }
    if amount <= 0.0 {
        return Err(RepoError::Validation(format!(
            "{field} must be positive, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(RepoError::Validation(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}

/// Validate an order line item before it is priced.
pub fn validate_order_item(item: &OrderItemInput) -> Result<(), RepoError> {
    if !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return Err(RepoError::Validation(format!(
            "unit_price must be non-negative, got {}",
            item.unit_price
        )));
    }
    if item.unit_price > MAX_AMOUNT {
        return Err(RepoError::Validation(format!(
            "unit_price exceeds maximum allowed ({MAX_AMOUNT}), got {}",
            item.unit_price
        )));
    }
    if item.quantity <= 0 {
        return Err(RepoError::Validation(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(RepoError::Validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {}",
            item.quantity
        )));
    }
    Ok(())
}

/// Whether a ledger entry subtracts from the received total. Anything that
/// is not a refund counts as received; unknown types are rejected before
/// they reach the ledger.
#[inline]
fn is_refund(entry: &PaymentEntry) -> bool {
    entry.payment_type == PaymentKind::Refund.as_str()
}

/// Net amount received for an order: payments minus refunds.
pub fn net_received(entries: &[PaymentEntry]) -> Decimal {
    entries.iter().fold(Decimal::ZERO, |acc, e| {
        let amount = to_decimal(e.amount);
        if is_refund(e) { acc - amount } else { acc + amount }
    })
}

/// Derive the financial summary for an order from its payment ledger.
///
/// `remaining_balance` floors at zero: overpayment is allowed and simply
/// clamps the balance.
pub fn summarize(total_amount: f64, entries: &[PaymentEntry]) -> LedgerSummary {
    let net = net_received(entries);
    let remaining = (to_decimal(total_amount) - net).max(Decimal::ZERO);
    LedgerSummary {
        net_received: to_f64(net),
        remaining_balance: to_f64(remaining),
    }
}

/// Upper bound for a refund: the net amount received so far.
pub fn max_refundable(entries: &[PaymentEntry]) -> f64 {
    to_f64(net_received(entries).max(Decimal::ZERO))
}

/// Line total for an order item.
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Computed order totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
}

/// Price an order: discount applies to the subtotal, tax applies to the
/// discounted amount.
pub fn order_totals(
    items: &[OrderItemInput],
    tax_rate_percent: f64,
    discount_percent: f64,
) -> OrderTotals {
    let hundred = Decimal::from(100);

    let subtotal = items.iter().fold(Decimal::ZERO, |acc, item| {
        acc + to_decimal(item.unit_price) * Decimal::from(item.quantity)
    });

    let discount = round_money(subtotal * to_decimal(discount_percent) / hundred);
    let taxable = subtotal - discount;
    let tax = round_money(taxable * to_decimal(tax_rate_percent) / hundred);
    let total = taxable + tax;

    OrderTotals {
        subtotal: to_f64(subtotal),
        tax_amount: to_f64(tax),
        discount_amount: to_f64(discount),
        total_amount: to_f64(total),
    }
}

#[cfg(test)]
mod tests;
