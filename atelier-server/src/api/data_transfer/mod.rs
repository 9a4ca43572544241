//! Data Transfer API module - CSV import/export

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/data-transfer", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/employees/export", get(handler::export_employees))
        .route("/employees/import", post(handler::import_employees))
        .route("/inventory/export", get(handler::export_inventory))
}
