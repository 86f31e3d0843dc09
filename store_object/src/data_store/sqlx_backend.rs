//! sqlx-backed units of work
//!
//! Each unit of work is a `sqlx::Transaction` taken from a pool. Queries receive the
//! transaction's connection (`DB::Connection`) as their execution context, so a DAO for
//! this backend simply runs its statements against `&mut *ctx`.

use super::transaction::{TransactionalDataStore, TransactionalResource, UnitOfWork};
use crate::errors::PersistenceError;
use async_trait::async_trait;
use sqlx::{Database, Pool, Postgres, Sqlite, Transaction};

pub type SqlxDataStore<DB> = TransactionalDataStore<SqlxResource<DB>>;
pub type PgDataStore = SqlxDataStore<Postgres>;
pub type SqliteDataStore = SqlxDataStore<Sqlite>;

/// Opens transactions on a sqlx pool
#[derive(Debug)]
pub struct SqlxResource<DB: Database> {
    pool: Pool<DB>,
}

impl<DB: Database> Clone for SqlxResource<DB> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

impl<DB: Database> SqlxResource<DB> {
    pub fn new(pool: Pool<DB>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }
}

impl<DB: Database> TransactionalDataStore<SqlxResource<DB>> {
    /// Data store whose units of work are transactions on `pool`
    pub fn from_pool(pool: Pool<DB>) -> Self {
        Self::new(SqlxResource::new(pool))
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &Pool<DB> {
        self.resource().pool()
    }
}

/// A running sqlx transaction
///
/// sqlx rolls back a transaction that is dropped while still open, which gives the
/// release-discards-changes behaviour units of work need.
pub struct SqlxUnitOfWork<DB: Database> {
    tx: Option<Transaction<'static, DB>>,
}

impl<DB: Database> SqlxUnitOfWork<DB> {
    fn take_open(&mut self, action: &str) -> Result<Transaction<'static, DB>, PersistenceError> {
        self.tx.take().ok_or_else(|| {
            PersistenceError::Transaction(format!("cannot {}: unit of work already ended", action))
        })
    }
}

#[async_trait]
impl<DB: Database> UnitOfWork for SqlxUnitOfWork<DB> {
    type Context = DB::Connection;

    fn context(&mut self) -> Result<&mut DB::Connection, PersistenceError> {
        self.tx.as_deref_mut().ok_or_else(|| {
            PersistenceError::Transaction("unit of work already ended".to_string())
        })
    }

    fn is_active(&self) -> bool {
        self.tx.is_some()
    }

    async fn commit(&mut self) -> Result<(), PersistenceError> {
        let tx = self.take_open("commit")?;
        tx.commit()
            .await
            .map_err(|e| PersistenceError::database("commit", e))
    }

    async fn rollback(&mut self) -> Result<(), PersistenceError> {
        let tx = self.take_open("roll back")?;
        tx.rollback()
            .await
            .map_err(|e| PersistenceError::database("rollback", e))
    }
}

#[async_trait]
impl<DB: Database> TransactionalResource for SqlxResource<DB> {
    type Context = DB::Connection;
    type Unit = SqlxUnitOfWork<DB>;

    async fn begin(&self) -> Result<SqlxUnitOfWork<DB>, PersistenceError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PersistenceError::database("begin transaction", e))?;
        Ok(SqlxUnitOfWork { tx: Some(tx) })
    }
}
