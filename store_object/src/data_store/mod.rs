//! Data stores
//!
//! A [`DataStore`] is the only place that manages unit-of-work boundaries. Every call to
//! [`DataStore::execute`] opens a fresh execution context, runs one query in it, and
//! commits or rolls back before the context is released.
//!
//! Separate `execute` calls are independent transactions: there is no nesting, no
//! cross-call locking and no ordering guarantee between them. How concurrent calls
//! interact is decided by the isolation level of the backend.

pub mod sqlx_backend;
pub mod transaction;

pub use sqlx_backend::{PgDataStore, SqliteDataStore, SqlxDataStore, SqlxResource, SqlxUnitOfWork};
pub use transaction::{TransactionalDataStore, TransactionalResource, UnitOfWork};

use crate::errors::PersistenceError;
use crate::query::Query;
use async_trait::async_trait;

/// Transactional executor for query objects
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Execution context handed to each query
    type Context: Send;

    /// Run `query` in its own unit of work
    ///
    /// On success the unit of work is committed and the query output returned. On
    /// failure it is rolled back and the query's error is returned as-is.
    async fn execute<Q>(&self, query: &Q) -> Result<Q::Output, PersistenceError>
    where
        Q: Query<Self::Context> + ?Sized;
}
