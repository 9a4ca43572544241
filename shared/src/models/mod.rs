//! Data models
//!
//! Shared between atelier-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! UTC milliseconds.

pub mod customer;
pub mod employee;
pub mod inventory;
pub mod lifecycle;
pub mod measurement;
pub mod order;
pub mod payment;
pub mod settings;
pub mod store;

// Re-exports
pub use customer::*;
pub use employee::*;
pub use inventory::*;
pub use lifecycle::*;
pub use measurement::*;
pub use order::*;
pub use payment::*;
pub use settings::*;
pub use store::*;
