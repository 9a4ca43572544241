//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`customers`] - customer management (incl. cascade delete)
//! - [`orders`] - orders, status transitions, payment ledger
//! - [`measurements`] - measurement profiles and version history
//! - [`inventory`] - inventory management
//! - [`employees`] - employee management
//! - [`stores`] - store management
//! - [`settings`] - order-status / VIP-tier display settings
//! - [`data_transfer`] - CSV import/export
//! - [`upload`] - reference image upload

pub mod customers;
pub mod data_transfer;
pub mod employees;
pub mod health;
pub mod inventory;
pub mod measurements;
pub mod orders;
pub mod settings;
pub mod stores;
pub mod upload;

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full application router.
pub fn router(state: ServerState) -> Router {
    let uploads_dir = state.config.uploads_dir();

    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(orders::router())
        .merge(measurements::router())
        .merge(inventory::router())
        .merge(employees::router())
        .merge(stores::router())
        .merge(settings::router())
        .merge(data_transfer::router())
        .merge(upload::router())
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
