//! Trait definitions
//!
//! This module defines the basic CRUD capability every DAO provides.

use crate::errors::PersistenceError;
use crate::id_type::{Identifiable, Identifier};
use async_trait::async_trait;

/// Basic keyed CRUD over one entity type
///
/// A DAO performs storage access against the execution context it is handed; it never
/// opens, commits or closes that context itself. The context is only valid for the
/// duration of one data store `execute` call and must not be retained.
///
/// Consistency and atomicity of each operation are defined by the backend. Whether
/// `update` of an entity that no longer exists fails is backend policy as well.
#[async_trait]
pub trait Dao: Send + Sync {
    /// Backend handle (connection, session, in-memory working copy, ...)
    type Context: Send;

    /// The entity this DAO stores
    type Entity: Identifiable + Send + Sync;

    /// Fetch one entity; `None` when nothing has that id
    async fn get(
        &self,
        id: &Identifier<Self::Entity>,
        ctx: &mut Self::Context,
    ) -> Result<Option<Self::Entity>, PersistenceError>;

    /// Insert an entity and return it with its assigned identifier
    async fn add(
        &self,
        entity: &Self::Entity,
        ctx: &mut Self::Context,
    ) -> Result<Self::Entity, PersistenceError>;

    /// Replace the stored state of an entity
    async fn update(
        &self,
        entity: &Self::Entity,
        ctx: &mut Self::Context,
    ) -> Result<Self::Entity, PersistenceError>;

    /// Delete by id; returns whether something was removed
    async fn delete(
        &self,
        id: &Identifier<Self::Entity>,
        ctx: &mut Self::Context,
    ) -> Result<bool, PersistenceError>;

    async fn exists(
        &self,
        id: &Identifier<Self::Entity>,
        ctx: &mut Self::Context,
    ) -> Result<bool, PersistenceError>;
}
