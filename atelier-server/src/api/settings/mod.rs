//! Display settings API module

mod handler;

use axum::{Router, routing::{get, put}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/order-statuses", get(handler::list_status_settings))
        .route(
            "/order-statuses/{code}",
            get(handler::get_status_setting).put(handler::upsert_status_setting),
        )
        .route("/vip-tiers", get(handler::list_vip_settings))
        .route(
            "/vip-tiers/{code}",
            get(handler::get_vip_setting).put(handler::upsert_vip_setting),
        )
}
