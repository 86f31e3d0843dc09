//! Query objects
//!
//! A query object captures its inputs and a borrowed DAO at construction time and, given
//! an execution context, performs exactly one DAO call (the upsert [`StoreQuery`] checks
//! existence first). Queries never catch errors: whatever the DAO returns is passed up
//! unchanged to the data store.
//!
//! Query objects hold no state between runs, so the same instance may be executed any
//! number of times; each execution is an independent unit of work.

pub mod collection;
pub mod crud;
pub mod filtered;

pub use collection::{ClearQuery, GetAllQuery, SizeQuery};
pub use crud::{AddQuery, DeleteByIdQuery, ExistQuery, GetQuery, StoreQuery, UpdateQuery};
pub use filtered::{CountQuery, DeleteQuery, FindQuery};

use crate::errors::PersistenceError;
use async_trait::async_trait;

/// A single unit of work executed against an execution context of type `C`
#[async_trait]
pub trait Query<C: Send>: Send + Sync {
    type Output: Send;

    /// Short operation name used in log events
    fn name(&self) -> &'static str;

    async fn execute(&self, ctx: &mut C) -> Result<Self::Output, PersistenceError>;
}

#[async_trait]
impl<C, Q> Query<C> for &Q
where
    C: Send,
    Q: Query<C> + ?Sized,
{
    type Output = Q::Output;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn execute(&self, ctx: &mut C) -> Result<Self::Output, PersistenceError> {
        (**self).execute(ctx).await
    }
}

/// Does nothing and touches nothing; usable as a placeholder against any context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopQuery;

#[async_trait]
impl<C: Send> Query<C> for NoopQuery {
    type Output = ();

    fn name(&self) -> &'static str {
        "noop"
    }

    async fn execute(&self, _ctx: &mut C) -> Result<(), PersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_returns_without_touching_context() {
        let mut ctx = vec![1, 2, 3];
        NoopQuery.execute(&mut ctx).await.unwrap();
        NoopQuery.execute(&mut ctx).await.unwrap();
        assert_eq!(ctx, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_reference_delegates() {
        let query = NoopQuery;
        let by_ref = &query;
        let mut ctx = 0u8;
        assert_eq!(Query::<u8>::name(&by_ref), "noop");
        by_ref.execute(&mut ctx).await.unwrap();
    }
}
