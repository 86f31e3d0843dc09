//! Object stores
//!
//! Repository-shaped façades. Each call builds the matching query object over the
//! store's DAO and hands it to the data store, so every call is one transaction.
//! The façades hold nothing but shared handles to their data store and DAO.

pub mod filtered;
pub mod key_value;

pub use filtered::FilteredObjectStore;
pub use key_value::ObjectStore;
