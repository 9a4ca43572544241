//! Atelier Server - boutique & tailoring shop management backend
//!
//! # Module structure
//!
//! ```text
//! atelier-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── billing/       # Ledger and order-total arithmetic (rust_decimal)
//! ├── notify/        # Order status-transition notifications (WhatsApp proxy)
//! └── utils/         # Errors, logging, validation, CSV
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::notify::Notifier;
pub use crate::utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging. Called once at process start.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___   __       ___
   /   | / /____  / (_)__  _____
  / /| |/ __/ _ \/ / / _ \/ ___/
 / ___ / /_/  __/ / /  __/ /
/_/  |_\__/\___/_/_/\___/_/
    "#
    );
}
