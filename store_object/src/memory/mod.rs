//! In-memory backend
//!
//! Keeps entities in [`MemoryTable`]s inside a shared state value. A unit of work locks
//! the state, works on a private copy and publishes the copy on commit, so transactions
//! are serialised and a failed or dropped unit of work leaves no trace.

pub mod dao;
pub mod resource;
pub mod table;

pub use dao::{FieldComparator, MemoryDao, MemoryFilter};
pub use resource::{MemoryDataStore, MemoryResource, MemoryUnitOfWork};
pub use table::{GeneratedKey, MemoryTable};
