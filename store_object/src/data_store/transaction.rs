//! Transaction support for data stores
//!
//! A [`TransactionalResource`] hands out [`UnitOfWork`]s; [`TransactionalDataStore`]
//! drives one unit of work per query. Releasing the execution context is tied to dropping
//! the unit of work, so it happens exactly once on every exit path, including failures
//! while committing or rolling back.

use super::DataStore;
use crate::errors::{cause_chain, PersistenceError};
use crate::query::Query;
use async_trait::async_trait;

/// One open transaction together with its execution context
///
/// Dropping a unit of work releases the context. A unit of work dropped while still
/// active must discard its changes.
#[async_trait]
pub trait UnitOfWork: Send {
    type Context: Send;

    /// The context queries run against; fails once the unit of work has ended
    fn context(&mut self) -> Result<&mut Self::Context, PersistenceError>;

    /// Whether the transaction is still open (neither committed nor rolled back)
    fn is_active(&self) -> bool;

    async fn commit(&mut self) -> Result<(), PersistenceError>;

    async fn rollback(&mut self) -> Result<(), PersistenceError>;
}

/// Something that can open units of work (a connection pool, an in-memory state, ...)
#[async_trait]
pub trait TransactionalResource: Send + Sync {
    type Context: Send;
    type Unit: UnitOfWork<Context = Self::Context>;

    async fn begin(&self) -> Result<Self::Unit, PersistenceError>;
}

/// Data store that runs each query in a fresh unit of work of `R`
#[derive(Debug, Clone)]
pub struct TransactionalDataStore<R> {
    resource: R,
}

impl<R: TransactionalResource> TransactionalDataStore<R> {
    pub fn new(resource: R) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }
}

#[async_trait]
impl<R: TransactionalResource> DataStore for TransactionalDataStore<R> {
    type Context = R::Context;

    async fn execute<Q>(&self, query: &Q) -> Result<Q::Output, PersistenceError>
    where
        Q: Query<Self::Context> + ?Sized,
    {
        let mut unit = self.resource.begin().await?;
        debug_log!("[{}] unit of work started", query.name());

        let outcome = match unit.context() {
            Ok(ctx) => query.execute(ctx).await,
            Err(err) => Err(err),
        };

        let result = match outcome {
            Ok(output) => match unit.commit().await {
                Ok(()) => {
                    debug_log!("[{}] committed", query.name());
                    Ok(output)
                }
                Err(err) => {
                    rollback_if_active(&mut unit, query.name()).await;
                    Err(err)
                }
            },
            Err(err) => {
                rollback_if_active(&mut unit, query.name()).await;
                Err(err)
            }
        };

        drop(unit);
        result
    }
}

/// Roll back a failed unit of work; a rollback failure is logged but never replaces the
/// error that caused it
async fn rollback_if_active<U: UnitOfWork>(unit: &mut U, query: &str) {
    if !unit.is_active() {
        return;
    }
    match unit.rollback().await {
        Ok(()) => {
            debug_log!("[{}] rolled back", query);
        }
        Err(err) => tracing::warn!(
            query,
            error = %cause_chain(&err),
            "rollback failed; the unit of work is discarded when its context is released"
        ),
    }
}
