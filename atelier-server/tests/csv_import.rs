//! Employee CSV import over HTTP: invalid rows are reported with their row
//! number while the surrounding valid rows still import.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use atelier_server::db::repository::employee;
use atelier_server::{Config, ServerState, api};

#[tokio::test]
async fn employee_import_tolerates_bad_rows() {
    let pool = common::test_pool().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::with_pool(config, pool.clone());
    let app = api::router(state);

    let csv = concat!(
        "name,phone,role,email\n",
        "Aisha,600111222,tailor,\n",
        "Broken,,tailor,\n",
        "Carlos,600333444,sales_associate,carlos@example.com\n",
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/data-transfer/employees/import")
                .header("content-type", "text/csv")
                .body(Body::from(csv))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let report: serde_json::Value = serde_json::from_slice(&bytes).expect("json report");

    assert_eq!(report["imported"], 2);
    let errors = report["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["row"], 3);
    assert!(
        errors[0]["message"]
            .as_str()
            .expect("message")
            .contains("phone")
    );

    // The valid rows around the broken one actually landed
    let employees = employee::find_all(&pool).await.expect("list employees");
    assert_eq!(employees.len(), 2);
}

#[tokio::test]
async fn unknown_role_is_reported_per_row() {
    let pool = common::test_pool().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::with_pool(config, pool.clone());
    let app = api::router(state);

    let csv = "Aisha,600111222,wizard\n";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/data-transfer/employees/import")
                .header("content-type", "text/csv")
                .body(Body::from(csv))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let report: serde_json::Value = serde_json::from_slice(&bytes).expect("json report");
    assert_eq!(report["imported"], 0);
    assert_eq!(report["errors"][0]["row"], 1);
    assert!(
        report["errors"][0]["message"]
            .as_str()
            .expect("message")
            .contains("role")
    );
}
