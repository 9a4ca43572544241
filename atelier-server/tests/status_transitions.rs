//! Order status state machine: fixed forward sequence, terminal states,
//! soft cancellation and settlement.

mod common;

use atelier_server::db::repository::{RepoError, order};
use shared::models::{OrderCreate, OrderStatus};

#[tokio::test]
async fn forward_sequence_advances_in_order() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let id = detail.order.order.id;

    for next in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProduction,
        OrderStatus::ReadyForPickup,
        OrderStatus::Completed,
    ] {
        let (_, updated) = order::update_status(&pool, id, next)
            .await
            .unwrap_or_else(|e| panic!("transition to {next} failed: {e}"));
        assert_eq!(updated.order.status, next);
    }
}

#[tokio::test]
async fn skipping_ahead_is_rejected() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;

    let err = order::update_status(&pool, detail.order.order.id, OrderStatus::InProduction)
        .await
        .expect_err("draft cannot jump to in_production");
    assert!(matches!(err, RepoError::BusinessRule(_)));
}

#[tokio::test]
async fn terminal_states_reject_further_transitions() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;

    // Completed order
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let id = detail.order.order.id;
    for next in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProduction,
        OrderStatus::ReadyForPickup,
        OrderStatus::Completed,
    ] {
        order::update_status(&pool, id, next).await.expect("advance");
    }
    for next in [OrderStatus::Cancelled, OrderStatus::InProduction] {
        let err = order::update_status(&pool, id, next)
            .await
            .expect_err("completed is terminal");
        assert!(matches!(err, RepoError::BusinessRule(_)));
    }

    // Cancelled order
    let detail = common::seed_order(&pool, customer.id, store.id, 500.0).await;
    let id = detail.order.order.id;
    order::cancel(&pool, id).await.expect("cancel");
    let err = order::update_status(&pool, id, OrderStatus::Pending)
        .await
        .expect_err("cancelled is terminal");
    assert!(matches!(err, RepoError::BusinessRule(_)));
}

#[tokio::test]
async fn cancellation_is_soft_and_settlement_follows_it() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;
    let detail = common::seed_order(&pool, customer.id, store.id, 1000.0).await;
    let id = detail.order.order.id;

    // Settling a live order is rejected
    let err = order::settle(&pool, id).await.expect_err("not cancelled yet");
    assert!(matches!(err, RepoError::BusinessRule(_)));

    let cancelled = order::cancel(&pool, id).await.expect("cancel");
    assert_eq!(cancelled.order.status, OrderStatus::Cancelled);
    assert!(!cancelled.order.is_settled);

    // The row still exists: cancellation never deletes
    let row = order::find_by_id(&pool, id).await.unwrap().expect("still there");
    assert_eq!(row.status, OrderStatus::Cancelled);

    let settled = order::settle(&pool, id).await.expect("settle");
    assert!(settled.is_settled);
}

#[tokio::test]
async fn orders_are_created_as_draft_or_pending_only() {
    let pool = common::test_pool().await;
    let customer = common::seed_customer(&pool, "Fatima").await;
    let store = common::seed_store(&pool).await;

    let err = order::create(
        &pool,
        OrderCreate {
            customer_id: customer.id,
            store_id: store.id,
            employee_id: None,
            status: Some(OrderStatus::Completed),
            due_date: None,
            notes: None,
            tax_rate_percent: None,
            discount_percent: None,
            items: Vec::new(),
        },
    )
    .await
    .expect_err("completed is not a valid initial status");
    assert!(matches!(err, RepoError::Validation(_)));
}
