//! Filtered object store

use crate::data_store::DataStore;
use crate::errors::PersistenceError;
use crate::id_type::Identifier;
use crate::ordering::Sort;
use crate::query::{
    AddQuery, ClearQuery, CountQuery, DeleteByIdQuery, DeleteQuery, ExistQuery, FindQuery,
    GetAllQuery, GetQuery, SizeQuery, StoreQuery, UpdateQuery,
};
use crate::traits::{FilterDao, KeyValueDao};
use std::fmt;
use std::sync::Arc;

/// Repository over a filter-capable DAO
///
/// Offers keyed access plus find/count/delete by the DAO's own filter type. When the
/// DAO is key-value capable as well, `get_all`, `size` and `clear` are available too.
pub struct FilteredObjectStore<S, D> {
    data_store: Arc<S>,
    dao: Arc<D>,
}

impl<S, D> Clone for FilteredObjectStore<S, D> {
    fn clone(&self) -> Self {
        Self {
            data_store: self.data_store.clone(),
            dao: self.dao.clone(),
        }
    }
}

impl<S, D> fmt::Debug for FilteredObjectStore<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredObjectStore")
            .field("data_store", &std::any::type_name::<S>())
            .field("dao", &std::any::type_name::<D>())
            .finish()
    }
}

impl<S, D> FilteredObjectStore<S, D>
where
    S: DataStore,
    D: FilterDao<Context = S::Context>,
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

    /// Delete every match; returns how many were removed
    pub async fn delete_where(&self, filter: D::Filter) -> Result<u64, PersistenceError> {
        self.data_store.execute(&DeleteQuery::new(&*self.dao, filter)).await
    }

    pub async fn exists(&self, id: Identifier<D::Entity>) -> Result<bool, PersistenceError> {
        self.data_store.execute(&ExistQuery::new(&*self.dao, id)).await
    }

    pub async fn find(
        &self,
        filter: D::Filter,
        sort: Sort<D::SortKey>,
    ) -> Result<Vec<D::Entity>, PersistenceError> {
        self.data_store.execute(&FindQuery::new(&*self.dao, filter, sort)).await
    }

    /// First match in `sort` order, if any
    pub async fn find_one(
        &self,
        filter: D::Filter,
        sort: Sort<D::SortKey>,
    ) -> Result<Option<D::Entity>, PersistenceError> {
        let found = self.find(filter, sort).await?;
        Ok(found.into_iter().next())
    }

    pub async fn count(&self, filter: D::Filter) -> Result<u64, PersistenceError> {
        self.data_store.execute(&CountQuery::new(&*self.dao, filter)).await
    }
}

impl<S, D> FilteredObjectStore<S, D>
where
    S: DataStore,
    D: FilterDao<Context = S::Context> + KeyValueDao,
{
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
