//! Keyed CRUD query objects

use super::Query;
use crate::errors::PersistenceError;
use crate::id_type::{Identifiable, Identifier};
use crate::traits::Dao;
use async_trait::async_trait;

/// Fetch one entity by id
pub struct GetQuery<'a, D: Dao> {
    dao: &'a D,
    id: Identifier<D::Entity>,
}

impl<'a, D: Dao> GetQuery<'a, D> {
    pub fn new(dao: &'a D, id: Identifier<D::Entity>) -> Self {
        Self { dao, id }
    }
}

#[async_trait]
impl<D: Dao> Query<D::Context> for GetQuery<'_, D> {
    type Output = Option<D::Entity>;

    fn name(&self) -> &'static str {
        "get"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<Self::Output, PersistenceError> {
        self.dao.get(&self.id, ctx).await
    }
}

/// Insert an entity; yields whatever the DAO returns (normally the entity with its new id)
pub struct AddQuery<'a, D: Dao> {
    dao: &'a D,
    entity: D::Entity,
}

impl<'a, D: Dao> AddQuery<'a, D> {
    pub fn new(dao: &'a D, entity: D::Entity) -> Self {
        Self { dao, entity }
    }
}

#[async_trait]
impl<D: Dao> Query<D::Context> for AddQuery<'_, D> {
    type Output = D::Entity;

    fn name(&self) -> &'static str {
        "add"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<Self::Output, PersistenceError> {
        self.dao.add(&self.entity, ctx).await
    }
}

pub struct UpdateQuery<'a, D: Dao> {
    dao: &'a D,
    entity: D::Entity,
}

impl<'a, D: Dao> UpdateQuery<'a, D> {
    pub fn new(dao: &'a D, entity: D::Entity) -> Self {
        Self { dao, entity }
    }
}

#[async_trait]
impl<D: Dao> Query<D::Context> for UpdateQuery<'_, D> {
    type Output = D::Entity;

    fn name(&self) -> &'static str {
        "update"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<Self::Output, PersistenceError> {
        self.dao.update(&self.entity, ctx).await
    }
}

pub struct DeleteByIdQuery<'a, D: Dao> {
    dao: &'a D,
    id: Identifier<D::Entity>,
}

impl<'a, D: Dao> DeleteByIdQuery<'a, D> {
    pub fn new(dao: &'a D, id: Identifier<D::Entity>) -> Self {
        Self { dao, id }
    }
}

#[async_trait]
impl<D: Dao> Query<D::Context> for DeleteByIdQuery<'_, D> {
    type Output = bool;

    fn name(&self) -> &'static str {
        "delete_by_id"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<bool, PersistenceError> {
        self.dao.delete(&self.id, ctx).await
    }
}

pub struct ExistQuery<'a, D: Dao> {
    dao: &'a D,
    id: Identifier<D::Entity>,
}

impl<'a, D: Dao> ExistQuery<'a, D> {
    pub fn new(dao: &'a D, id: Identifier<D::Entity>) -> Self {
        Self { dao, id }
    }
}

#[async_trait]
impl<D: Dao> Query<D::Context> for ExistQuery<'_, D> {
    type Output = bool;

    fn name(&self) -> &'static str {
        "exists"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<bool, PersistenceError> {
        self.dao.exists(&self.id, ctx).await
    }
}

/// Upsert: `update` when the entity's id is already stored, `add` otherwise
///
/// The existence check and the write run against the same context, so they are only
/// race-free inside one transaction. Two concurrent upserts of the same id are as safe
/// as the backend's isolation level makes them.
pub struct StoreQuery<'a, D: Dao> {
    dao: &'a D,
    entity: D::Entity,
}

impl<'a, D: Dao> StoreQuery<'a, D> {
    pub fn new(dao: &'a D, entity: D::Entity) -> Self {
        Self { dao, entity }
    }
}

#[async_trait]
impl<D: Dao> Query<D::Context> for StoreQuery<'_, D> {
    type Output = D::Entity;

    fn name(&self) -> &'static str {
        "store"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<Self::Output, PersistenceError> {
        // An entity without an id has never been persisted.
        let exists = match self.entity.id() {
            Some(id) => self.dao.exists(&id, ctx).await?,
            None => false,
        };

        if exists {
            self.dao.update(&self.entity, ctx).await
        } else {
            self.dao.add(&self.entity, ctx).await
        }
    }
}
