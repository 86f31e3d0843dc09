//! Store Object - Core persistence access layer for QueryStore
//!
//! This crate provides typed identifiers, the DAO capability traits, reusable query
//! objects, the transactional data store that executes them, and repository-style
//! object stores built on top. Backends plug in through [`TransactionalResource`]:
//! sqlx pools and an in-memory state are provided.

/// Conditional debug logging; compiled in only with the `debug-logging` feature.
/// Defined before the module declarations so every module sees it.
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod data_store;
pub mod errors;
pub mod id_type;
pub mod logging;
pub mod memory;
pub mod object_store;
pub mod ordering;
pub mod prelude;
pub mod query;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use data_store::{
    DataStore, PgDataStore, SqliteDataStore, SqlxDataStore, TransactionalDataStore,
    TransactionalResource, UnitOfWork,
};
pub use errors::{ConstraintKind, PersistenceError, PersistenceResult};
pub use id_type::{AssignId, Identifiable, Identifier};
pub use logging::{LogLevel, LoggedQuery, ParseLogLevelError, QueryExt};
pub use object_store::{FilteredObjectStore, ObjectStore};
pub use ordering::{Sort, SortField, SortOrder};
pub use query::{NoopQuery, Query};
pub use traits::*;
