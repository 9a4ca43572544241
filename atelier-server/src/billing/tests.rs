use super::*;

fn entry(payment_type: &str, amount: f64) -> PaymentEntry {
    PaymentEntry {
        id: 1,
        order_id: 1,
        payment_type: payment_type.to_string(),
        amount,
        method: None,
        notes: None,
        created_at: 0,
    }
}

#[test]
fn decimal_beats_f64_accumulation() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let sum_f64 = 0.1_f64 + 0.2_f64;
    assert_ne!(sum_f64, 0.3);

    let sum_dec = to_decimal(0.1) + to_decimal(0.2);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn accumulation_precision() {
    let mut total = Decimal::ZERO;
    for _ in 0..1000 {
        total += to_decimal(0.01);
    }
    assert_eq!(to_f64(total), 10.0);
}

#[test]
fn summarize_empty_ledger() {
    let summary = summarize(1200.0, &[]);
    assert_eq!(summary.net_received, 0.0);
    assert_eq!(summary.remaining_balance, 1200.0);
}

#[test]
fn summarize_payments_and_refunds() {
    let entries = vec![
        entry("payment", 500.0),
        entry("payment", 300.0),
        entry("refund", 200.0),
    ];
    let summary = summarize(1000.0, &entries);
    assert_eq!(summary.net_received, 600.0);
    assert_eq!(summary.remaining_balance, 400.0);
}

#[test]
fn overpayment_clamps_balance_at_zero() {
    let entries = vec![entry("payment", 1500.0)];
    let summary = summarize(1000.0, &entries);
    assert_eq!(summary.net_received, 1500.0);
    assert_eq!(summary.remaining_balance, 0.0);
}

#[test]
fn refund_can_push_balance_back_up() {
    let entries = vec![entry("payment", 1000.0), entry("refund", 400.0)];
    let summary = summarize(1000.0, &entries);
    assert_eq!(summary.net_received, 600.0);
    assert_eq!(summary.remaining_balance, 400.0);
}

#[test]
fn max_refundable_is_net_received() {
    let entries = vec![entry("payment", 500.0), entry("refund", 100.0)];
    assert_eq!(max_refundable(&entries), 400.0);
}

#[test]
fn max_refundable_floors_at_zero() {
    // Ledger that somehow net-refunded more than received
    let entries = vec![entry("payment", 100.0), entry("refund", 300.0)];
    assert_eq!(max_refundable(&entries), 0.0);
}

#[test]
fn validate_amount_rejects_bad_values() {
    assert!(validate_amount(0.0, "amount").is_err());
    assert!(validate_amount(-5.0, "amount").is_err());
    assert!(validate_amount(f64::NAN, "amount").is_err());
    assert!(validate_amount(f64::INFINITY, "amount").is_err());
    assert!(validate_amount(2_000_000.0, "amount").is_err());
    assert!(validate_amount(250.50, "amount").is_ok());
}

fn item(unit_price: f64, quantity: i64) -> OrderItemInput {
    OrderItemInput {
        inventory_item_id: None,
        measurement_id: None,
        measurement_version_id: None,
        name: "Sherwani".to_string(),
        unit_price,
        quantity,
    }
}

#[test]
fn line_total_multiplies_precisely() {
    assert_eq!(line_total(10.99, 3), 32.97);
}

#[test]
fn order_totals_no_adjustments() {
    let totals = order_totals(&[item(100.0, 2), item(50.0, 1)], 0.0, 0.0);
    assert_eq!(totals.subtotal, 250.0);
    assert_eq!(totals.tax_amount, 0.0);
    assert_eq!(totals.discount_amount, 0.0);
    assert_eq!(totals.total_amount, 250.0);
}

#[test]
fn order_totals_discount_then_tax() {
    // 10% discount on 1000 → 900 taxable; 5% tax → 45; total 945
    let totals = order_totals(&[item(1000.0, 1)], 5.0, 10.0);
    assert_eq!(totals.subtotal, 1000.0);
    assert_eq!(totals.discount_amount, 100.0);
    assert_eq!(totals.tax_amount, 45.0);
    assert_eq!(totals.total_amount, 945.0);
}

#[test]
fn order_totals_rounds_half_up() {
    // 33.33% of 100 = 33.33; tax 7.5% of 66.67 = 5.00025 → 5.00
    let totals = order_totals(&[item(100.0, 1)], 7.5, 33.33);
    assert_eq!(totals.discount_amount, 33.33);
    assert_eq!(totals.tax_amount, 5.0);
    assert_eq!(totals.total_amount, 71.67);
}

#[test]
fn validate_order_item_bounds() {
    assert!(validate_order_item(&item(10.0, 1)).is_ok());
    assert!(validate_order_item(&item(-1.0, 1)).is_err());
    assert!(validate_order_item(&item(10.0, 0)).is_err());
    assert!(validate_order_item(&item(10.0, 10_000)).is_err());
    assert!(validate_order_item(&item(f64::NAN, 1)).is_err());
}
