//! Order API module

mod handler;

use axum::{Router, routing::{get, post, put}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::cancel),
        )
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/settle", post(handler::settle))
        .route("/{id}/summary", get(handler::summary))
        .route(
            "/{id}/payments",
            get(handler::list_payments).post(handler::record_payment),
        )
}
