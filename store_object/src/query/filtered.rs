//! Filtered query objects
//!
//! Filters and sorts are stored as given and handed to the DAO untouched.

use super::Query;
use crate::errors::PersistenceError;
use crate::ordering::Sort;
use crate::traits::FilterDao;
use async_trait::async_trait;

pub struct FindQuery<'a, D: FilterDao> {
    dao: &'a D,
    filter: D::Filter,
    sort: Sort<D::SortKey>,
}

impl<'a, D: FilterDao> FindQuery<'a, D> {
    pub fn new(dao: &'a D, filter: D::Filter, sort: Sort<D::SortKey>) -> Self {
        Self { dao, filter, sort }
    }

    /// Find in the backend's natural order
    pub fn unsorted(dao: &'a D, filter: D::Filter) -> Self {
        Self::new(dao, filter, Sort::unsorted())
    }
}

#[async_trait]
impl<D: FilterDao> Query<D::Context> for FindQuery<'_, D> {
    type Output = Vec<D::Entity>;

    fn name(&self) -> &'static str {
        "find"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<Self::Output, PersistenceError> {
        self.dao.find(&self.filter, &self.sort, ctx).await
    }
}

pub struct CountQuery<'a, D: FilterDao> {
    dao: &'a D,
    filter: D::Filter,
}

impl<'a, D: FilterDao> CountQuery<'a, D> {
    pub fn new(dao: &'a D, filter: D::Filter) -> Self {
        Self { dao, filter }
    }
}

#[async_trait]
impl<D: FilterDao> Query<D::Context> for CountQuery<'_, D> {
    type Output = u64;

    fn name(&self) -> &'static str {
        "count"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<u64, PersistenceError> {
        self.dao.count(&self.filter, ctx).await
    }
}

/// Delete every entity matching a filter; yields how many were removed
pub struct DeleteQuery<'a, D: FilterDao> {
    dao: &'a D,
    filter: D::Filter,
}

impl<'a, D: FilterDao> DeleteQuery<'a, D> {
    pub fn new(dao: &'a D, filter: D::Filter) -> Self {
        Self { dao, filter }
    }
}

#[async_trait]
impl<D: FilterDao> Query<D::Context> for DeleteQuery<'_, D> {
    type Output = u64;

    fn name(&self) -> &'static str {
        "delete"
    }

    async fn execute(&self, ctx: &mut D::Context) -> Result<u64, PersistenceError> {
        self.dao.delete_where(&self.filter, ctx).await
    }
}
