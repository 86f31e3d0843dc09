//! Trait definitions
//!
//! Filtered query capability. Filters and sort keys are opaque to this crate: the DAO
//! defines and interprets them, everything in between only passes them along.

use super::core::Dao;
use crate::errors::PersistenceError;
use crate::ordering::Sort;
use async_trait::async_trait;

/// DAOs that can select, count and delete by a backend-defined filter
#[async_trait]
pub trait FilterDao: Dao {
    type Filter: Send + Sync;
    type SortKey: Send + Sync;

    /// Entities matching `filter`, ordered by `sort`
    async fn find(
        &self,
        filter: &Self::Filter,
        sort: &Sort<Self::SortKey>,
        ctx: &mut Self::Context,
    ) -> Result<Vec<Self::Entity>, PersistenceError>;

    async fn count(
        &self,
        filter: &Self::Filter,
        ctx: &mut Self::Context,
    ) -> Result<u64, PersistenceError>;

    /// Delete every match; zero matches is not an error. Returns the number removed.
    async fn delete_where(
        &self,
        filter: &Self::Filter,
        ctx: &mut Self::Context,
    ) -> Result<u64, PersistenceError>;
}
