//! Error types for the QueryStore crate
//!
//! This module contains all error types that can be returned by QueryStore operations.

use config::ConfigError;
use store_object::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryStoreError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store object not found: {0}")]
    StoreNotFound(String),

    #[error("Store object already registered: {0}")]
    StoreAlreadyRegistered(String),

    #[error("Embedded database is not running")]
    EmbeddedNotStarted,
}
