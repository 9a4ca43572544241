//! Shared types for the Atelier suite
//!
//! Data models and small utilities used by the server and by API clients.
//! DB row types gate their `sqlx` derives behind the `db` feature so pure
//! clients can depend on this crate without pulling in a database driver.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
