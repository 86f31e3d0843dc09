//! Traits for data access
//!
//! This module contains the DAO capability sets a storage backend implements:
//! basic CRUD ([`Dao`]), whole-collection access ([`KeyValueDao`]) and filtered
//! queries ([`FilterDao`]).

pub mod core;
pub mod filterable;
pub mod key_value;

pub use self::core::Dao;
pub use filterable::FilterDao;
pub use key_value::KeyValueDao;
