//! Convenience re-exports for common QueryStore usage
//!
//! This prelude module re-exports the most commonly used items from the QueryStore crates,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use querystore::prelude::*;
//!
//! // Now you have access to all the common QueryStore types and traits
//! ```

// Core QueryStore components
pub use crate::core::QueryStore;
pub use crate::embedded::EmbeddedDatabase;
pub use crate::errors::QueryStoreError;
pub use crate::logged_query;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, EmbeddedDatabaseConfig, LoggingConfig};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{FromRow, PgConnection, PgPool, Row, SqliteConnection, SqlitePool};
