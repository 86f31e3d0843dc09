//! Transactional access to in-memory state

use crate::data_store::{TransactionalDataStore, TransactionalResource, UnitOfWork};
use crate::errors::PersistenceError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub type MemoryDataStore<S> = TransactionalDataStore<MemoryResource<S>>;

/// Shared in-memory state of type `S`
///
/// Units of work are serialised on one lock, and each one clones the whole state when it
/// begins, read-only queries included. That keeps rollback trivial but makes every
/// `execute` O(size of `S`): this backend is meant for tests and small embedded data sets.
#[derive(Debug, Default)]
pub struct MemoryResource<S> {
    state: Arc<Mutex<S>>,
}

impl<S> Clone for MemoryResource<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<S: Clone + Send + Sync + 'static> MemoryResource<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy of the last committed state
    pub async fn snapshot(&self) -> S {
        self.state.lock().await.clone()
    }
}

impl<S: Clone + Send + Sync + 'static> TransactionalDataStore<MemoryResource<S>> {
    /// Data store over a fresh in-memory state
    pub fn in_memory(state: S) -> Self {
        Self::new(MemoryResource::new(state))
    }
}

/// Exclusive lock on the shared state plus the working copy queries modify
pub struct MemoryUnitOfWork<S> {
    guard: Option<OwnedMutexGuard<S>>,
    working: S,
}

#[async_trait]
impl<S: Clone + Send + Sync + 'static> UnitOfWork for MemoryUnitOfWork<S> {
    type Context = S;

    fn context(&mut self) -> Result<&mut S, PersistenceError> {
        if self.guard.is_none() {
            return Err(PersistenceError::Transaction(
                "unit of work already ended".to_string(),
            ));
        }
        Ok(&mut self.working)
    }

    fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    async fn commit(&mut self) -> Result<(), PersistenceError> {
        let mut guard = self.guard.take().ok_or_else(|| {
            PersistenceError::Transaction("cannot commit: unit of work already ended".to_string())
        })?;
        std::mem::swap(&mut *guard, &mut self.working);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), PersistenceError> {
        self.guard.take().map(drop).ok_or_else(|| {
            PersistenceError::Transaction("cannot roll back: unit of work already ended".to_string())
        })
    }
}

#[async_trait]
impl<S: Clone + Send + Sync + 'static> TransactionalResource for MemoryResource<S> {
    type Context = S;
    type Unit = MemoryUnitOfWork<S>;

    async fn begin(&self) -> Result<MemoryUnitOfWork<S>, PersistenceError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(MemoryUnitOfWork {
            guard: Some(guard),
            working,
        })
    }
}
