//! DAO over a [`MemoryTable`]
//!
//! `MemoryDao<E, S>` works against any state `S` that exposes a table of `E` through
//! `AsMut`, so one shared state can hold several tables and a single unit of work can
//! span all of them.

use super::table::{GeneratedKey, MemoryTable};
use crate::errors::PersistenceError;
use crate::id_type::{AssignId, Identifier};
use crate::ordering::Sort;
use crate::traits::{Dao, FilterDao, KeyValueDao};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Predicate filter for in-memory finds, counts and deletes
pub struct MemoryFilter<E> {
    predicate: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> MemoryFilter<E> {
    pub fn new(predicate: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Matches every entity
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, entity: &E) -> bool {
        (self.predicate)(entity)
    }
}

impl<E> Clone for MemoryFilter<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
        }
    }
}

impl<E> fmt::Debug for MemoryFilter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MemoryFilter")
    }
}

/// A named, comparable attribute of `E`, used as the sort key of in-memory finds
pub struct FieldComparator<E> {
    name: &'static str,
    compare: Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>,
}

impl<E> FieldComparator<E> {
    /// Compare entities by the value `key` extracts
    pub fn by_key<K: Ord>(
        name: &'static str,
        key: impl Fn(&E) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            compare: Arc::new(move |a, b| key(a).cmp(&key(b))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<E> Clone for FieldComparator<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            compare: self.compare.clone(),
        }
    }
}

impl<E> fmt::Debug for FieldComparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldComparator").field(&self.name).finish()
    }
}

/// DAO for entities of type `E` stored in the table that state `S` exposes
pub struct MemoryDao<E, S = MemoryTable<E>>
where
    E: AssignId,
{
    _phantom: PhantomData<fn() -> (E, S)>,
}

impl<E: AssignId, S> MemoryDao<E, S> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<E: AssignId, S> Default for MemoryDao<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: AssignId, S> fmt::Debug for MemoryDao<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDao")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

#[async_trait]
impl<E, S> Dao for MemoryDao<E, S>
where
    E: AssignId + Clone + Send + Sync,
    E::Key: GeneratedKey,
    S: AsMut<MemoryTable<E>> + Send,
{
    type Context = S;
    type Entity = E;

    async fn get(&self, id: &Identifier<E>, ctx: &mut S) -> Result<Option<E>, PersistenceError> {
        Ok(ctx.as_mut().get(id).cloned())
    }

    async fn add(&self, entity: &E, ctx: &mut S) -> Result<E, PersistenceError> {
        ctx.as_mut().insert(entity)
    }

    async fn update(&self, entity: &E, ctx: &mut S) -> Result<E, PersistenceError> {
        ctx.as_mut().replace(entity)
    }

    async fn delete(&self, id: &Identifier<E>, ctx: &mut S) -> Result<bool, PersistenceError> {
        Ok(ctx.as_mut().remove(id).is_some())
    }

    async fn exists(&self, id: &Identifier<E>, ctx: &mut S) -> Result<bool, PersistenceError> {
        Ok(ctx.as_mut().contains(id))
    }
}

#[async_trait]
impl<E, S> KeyValueDao for MemoryDao<E, S>
where
    E: AssignId + Clone + Send + Sync,
    E::Key: GeneratedKey,
    S: AsMut<MemoryTable<E>> + Send,
{
    async fn get_all(&self, ctx: &mut S) -> Result<Vec<E>, PersistenceError> {
        Ok(ctx.as_mut().values().into_iter().cloned().collect())
    }

    async fn size(&self, ctx: &mut S) -> Result<u64, PersistenceError> {
        Ok(ctx.as_mut().len() as u64)
    }

    async fn clear(&self, ctx: &mut S) -> Result<(), PersistenceError> {
        ctx.as_mut().clear();
        Ok(())
    }
}

#[async_trait]
impl<E, S> FilterDao for MemoryDao<E, S>
where
    E: AssignId + Clone + Send + Sync + 'static,
    E::Key: GeneratedKey,
    S: AsMut<MemoryTable<E>> + Send,
{
    type Filter = MemoryFilter<E>;
    type SortKey = FieldComparator<E>;

    async fn find(
        &self,
        filter: &MemoryFilter<E>,
        sort: &Sort<FieldComparator<E>>,
        ctx: &mut S,
    ) -> Result<Vec<E>, PersistenceError> {
        let mut found: Vec<E> = ctx
            .as_mut()
            .values()
            .into_iter()
            .filter(|entity| filter.matches(entity))
            .cloned()
            .collect();

        // Stable sort, so ties keep insertion order.
        found.sort_by(|a, b| {
            sort.iter()
                .map(|field| field.order.apply(field.key.compare(a, b)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(found)
    }

    async fn count(&self, filter: &MemoryFilter<E>, ctx: &mut S) -> Result<u64, PersistenceError> {
        let table = ctx.as_mut();
        Ok(table.values().into_iter().filter(|e| filter.matches(e)).count() as u64)
    }

    async fn delete_where(
        &self,
        filter: &MemoryFilter<E>,
        ctx: &mut S,
    ) -> Result<u64, PersistenceError> {
        Ok(ctx.as_mut().remove_where(|e| filter.matches(e)))
    }
}
