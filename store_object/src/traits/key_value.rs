//! Trait definitions
//!
//! Whole-collection operations offered by key-value style DAOs.

use super::core::Dao;
use crate::errors::PersistenceError;
use async_trait::async_trait;

/// DAOs that can enumerate, count and wipe their whole collection
#[async_trait]
pub trait KeyValueDao: Dao {
    async fn get_all(&self, ctx: &mut Self::Context) -> Result<Vec<Self::Entity>, PersistenceError>;

    async fn size(&self, ctx: &mut Self::Context) -> Result<u64, PersistenceError>;

    async fn clear(&self, ctx: &mut Self::Context) -> Result<(), PersistenceError>;
}
