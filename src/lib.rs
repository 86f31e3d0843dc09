//! # QueryStore
//!
//! A transactional query-object layer: typed DAOs, reusable query objects, a data store
//! that runs each query in its own unit of work, and repository-style object stores.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use querystore::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! pub struct User {
//!     pub id: Option<i64>,
//!     pub name: String,
//! }
//!
//! impl Identifiable for User {
//!     type Key = i64;
//!
//!     fn id(&self) -> Option<Identifier<Self>> {
//!         self.id.map(Identifier::new)
//!     }
//! }
//!
//! impl AssignId for User {
//!     fn assign_id(&mut self, id: Identifier<Self>) {
//!         self.id = Some(id.into_raw());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let users = ObjectStore::new(
//!         std::sync::Arc::new(MemoryDataStore::in_memory(MemoryTable::<User>::new())),
//!         std::sync::Arc::new(MemoryDao::<User>::new()),
//!     );
//!
//!     let created = users.add(User { id: None, name: "John Doe".to_string() }).await?;
//!     println!("Created user {:?}: {}", created.id, created.name);
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod embedded;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::QueryStore;
pub use embedded::EmbeddedDatabase;
pub use errors::QueryStoreError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, EmbeddedDatabaseConfig, LoggingConfig};

// Re-export internal crates used in the public API
pub use store_object;

// Re-export external dependencies used in public API
pub use sqlx;
pub use async_trait;

/// Wrap `query` in a [`store_object::LoggedQuery`] at the level named by `config`
///
/// An unknown level name is a configuration error.
pub fn logged_query<Q>(
    query: Q,
    config: &LoggingConfig,
) -> Result<store_object::LoggedQuery<Q>, QueryStoreError> {
    let level: store_object::LogLevel = config
        .query_level
        .parse()
        .map_err(|e: store_object::ParseLogLevelError| config::ConfigError::Invalid(e.to_string()))?;
    Ok(store_object::LoggedQuery::with_level(query, level))
}
