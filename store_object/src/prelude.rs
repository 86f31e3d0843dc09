//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{Dao, FilterDao, KeyValueDao};
pub use crate::id_type::{AssignId, Identifiable, Identifier};

// Error types
pub use crate::errors::{ConstraintKind, PersistenceError, PersistenceResult};

// Query objects
pub use crate::query::{
    AddQuery, ClearQuery, CountQuery, DeleteByIdQuery, DeleteQuery, ExistQuery, FindQuery,
    GetAllQuery, GetQuery, NoopQuery, Query, SizeQuery, StoreQuery, UpdateQuery,
};
pub use crate::ordering::{Sort, SortOrder};

// Data stores and backends
pub use crate::data_store::{
    DataStore, PgDataStore, SqliteDataStore, SqlxDataStore, TransactionalDataStore,
    TransactionalResource, UnitOfWork,
};
pub use crate::memory::{FieldComparator, MemoryDao, MemoryDataStore, MemoryFilter, MemoryTable};

// Object stores
pub use crate::object_store::{FilteredObjectStore, ObjectStore};

// Logging decorator
pub use crate::logging::{LogLevel, LoggedQuery, ParseLogLevelError, QueryExt};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use uuid::Uuid;
