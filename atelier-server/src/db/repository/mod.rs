//! Repository Module
//!
//! CRUD operations over the SQLite tables, one module per entity. Functions
//! take the pool (or a transaction) explicitly; multi-step mutations that
//! must not drift (ledger insert + balance mirror, measurement snapshot +
//! update, customer cascade delete) run inside a single transaction.

pub mod customer;
pub mod employee;
pub mod inventory;
pub mod measurement;
pub mod order;
pub mod settings;
pub mod store;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let msg = db_err.message();
            if msg.contains("UNIQUE constraint failed") {
                return RepoError::Duplicate(msg.to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
