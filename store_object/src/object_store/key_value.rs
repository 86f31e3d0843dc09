//! Key-value object store

use crate::data_store::DataStore;
use crate::errors::PersistenceError;
use crate::id_type::Identifier;
use crate::query::{
    AddQuery, ClearQuery, DeleteByIdQuery, ExistQuery, GetAllQuery, GetQuery, SizeQuery,
    StoreQuery, UpdateQuery,
};
use crate::traits::KeyValueDao;
use std::fmt;
use std::sync::Arc;

/// Repository over a key-value DAO: access by id plus whole-collection operations
pub struct ObjectStore<S, D> {
    data_store: Arc<S>,
    dao: Arc<D>,
}

impl<S, D> Clone for ObjectStore<S, D> {
    fn clone(&self) -> Self {
        Self {
            data_store: self.data_store.clone(),
            dao: self.dao.clone(),
        }
    }
}

impl<S, D> fmt::Debug for ObjectStore<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("data_store", &std::any::type_name::<S>())
            .field("dao", &std::any::type_name::<D>())
            .finish()
    }
}

impl<S, D> ObjectStore<S, D>
where
    S: DataStore,
    D: KeyValueDao<Context = S::Context>,
{
    pub fn new(data_store: Arc<S>, dao: Arc<D>) -> Self {
        Self { data_store, dao }
    }

    pub fn data_store(&self) -> &Arc<S> {
        &self.data_store
    }

    pub fn dao(&self) -> &Arc<D> {
        &self.dao
    }

    pub async fn get(&self, id: Identifier<D::Entity>) -> Result<Option<D::Entity>, PersistenceError> {
        self.data_store.execute(&GetQuery::new(&*self.dao, id)).await
    }

    pub async fn add(&self, entity: D::Entity) -> Result<D::Entity, PersistenceError> {
        self.data_store.execute(&AddQuery::new(&*self.dao, entity)).await
    }

    pub async fn update(&self, entity: D::Entity) -> Result<D::Entity, PersistenceError> {
        self.data_store.execute(&UpdateQuery::new(&*self.dao, entity)).await
    }

    /// Insert or update depending on whether the entity's id is already stored
    pub async fn store(&self, entity: D::Entity) -> Result<D::Entity, PersistenceError> {
        self.data_store.execute(&StoreQuery::new(&*self.dao, entity)).await
    }

    /// Returns whether an entity was removed
    pub async fn delete(&self, id: Identifier<D::Entity>) -> Result<bool, PersistenceError> {
        self.data_store.execute(&DeleteByIdQuery::new(&*self.dao, id)).await
    }

    pub async fn exists(&self, id: Identifier<D::Entity>) -> Result<bool, PersistenceError> {
        self.data_store.execute(&ExistQuery::new(&*self.dao, id)).await
    }

    pub async fn get_all(&self) -> Result<Vec<D::Entity>, PersistenceError> {
        self.data_store.execute(&GetAllQuery::new(&*self.dao)).await
    }

    pub async fn size(&self) -> Result<u64, PersistenceError> {
        self.data_store.execute(&SizeQuery::new(&*self.dao)).await
    }

    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.data_store.execute(&ClearQuery::new(&*self.dao)).await
    }
}
