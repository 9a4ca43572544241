//! Payment ledger flow: the order's cached financial columns must always
//! equal the ledger-derived figures, refunds are capped, overpayment clamps.

mod common;

use atelier_server::db::repository::{RepoError, order};
use shared::models::PaymentCreate;

fn payment(amount: f64) -> PaymentCreate {
    PaymentCreate {
        payment_type: "payment".to_string(),
        amount,
        method: Some("cash".to_string()),
        notes: None,
    }
}

fn refund(amount: f64) -> PaymentCreate {
    PaymentCreate {
        payment_type: "refund".to_string(),
        amount,
        method: Some("cash".to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn balance_mirrors_ledger_through_payments_and_refunds() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let order_id = detail.order.order.id;

    assert_eq!(detail.order.order.total_amount, 1000.0);
    assert_eq!(detail.order.order.deposit_amount, 0.0);
    assert_eq!(detail.order.order.remaining_balance, 1000.0);

    let (_, updated) = order::record_ledger_entry(&pool, order_id, payment(400.0))
        .await
        .expect("record payment");
    assert_eq!(updated.deposit_amount, 400.0);
    assert_eq!(updated.remaining_balance, 600.0);

    let (_, updated) = order::record_ledger_entry(&pool, order_id, refund(150.0))
        .await
        .expect("record refund");
    assert_eq!(updated.deposit_amount, 250.0);
    assert_eq!(updated.remaining_balance, 750.0);

    // Cached columns agree with the summary re-derived from the ledger
    let summary = order::ledger_summary(&pool, order_id).await.expect("summary");
    assert_eq!(summary.net_received, updated.deposit_amount);
    assert_eq!(summary.remaining_balance, updated.remaining_balance);
}

#[tokio::test]
async fn overpayment_is_allowed_and_clamps_balance_at_zero() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let order_id = detail.order.order.id;

    let (_, updated) = order::record_ledger_entry(&pool, order_id, payment(1500.0))
        .await
        .expect("record overpayment");
    assert_eq!(updated.deposit_amount, 1500.0);
    assert_eq!(updated.remaining_balance, 0.0);
}

#[tokio::test]
async fn refund_exceeding_net_received_is_rejected() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let order_id = detail.order.order.id;

    order::record_ledger_entry(&pool, order_id, payment(500.0))
        .await
        .expect("record payment");

    let err = order::record_ledger_entry(&pool, order_id, refund(800.0))
        .await
        .expect_err("refund above net received must fail");
    assert!(matches!(err, RepoError::BusinessRule(_)));

    // Nothing landed: ledger still has one entry, balance untouched
    let payments = order::list_payments(&pool, order_id).await.expect("payments");
    assert_eq!(payments.len(), 1);
    let row = order::find_by_id(&pool, order_id)
        .await
        .expect("find order")
        .expect("order exists");
    assert_eq!(row.deposit_amount, 500.0);
    assert_eq!(row.remaining_balance, 500.0);
}

#[tokio::test]
async fn unknown_payment_type_is_rejected_at_the_boundary() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let order_id = detail.order.order.id;

    let err = order::record_ledger_entry(
        &pool,
        order_id,
        PaymentCreate {
            payment_type: "store_credit".to_string(),
            amount: 100.0,
            method: None,
            notes: None,
        },
    )
    .await
    .expect_err("unknown type must be rejected");
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(order::list_payments(&pool, order_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_amounts_are_rejected() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let order_id = detail.order.order.id;

    for amount in [0.0, -50.0, f64::NAN, 2_000_000.0] {
        let err = order::record_ledger_entry(&pool, order_id, payment(amount))
            .await
            .expect_err("invalid amount must be rejected");
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
