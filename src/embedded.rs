//! Embedded database for integration tests
//!
//! [`EmbeddedDatabase`] brings up a local SQLite database so repositories can be tested
//! against a real transactional backend without an external server. Starting and
//! stopping are idempotent: only the first `start()` opens the pool and only the first
//! `stop()` after it closes it.

use config::EmbeddedDatabaseConfig;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use store_object::SqliteDataStore;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::QueryStoreError;

#[derive(Debug)]
pub struct EmbeddedDatabase {
    config: EmbeddedDatabaseConfig,
    pool: Mutex<Option<SqlitePool>>,
}

impl EmbeddedDatabase {
    pub fn new(config: EmbeddedDatabaseConfig) -> Self {
        Self {
            config,
            pool: Mutex::new(None),
        }
    }

    /// In-memory database with the default configuration
    pub fn in_memory() -> Self {
        Self::new(EmbeddedDatabaseConfig::default())
    }

    /// Open the database; a no-op when it is already running
    pub async fn start(&self) -> Result<(), QueryStoreError> {
        let mut pool = self.pool.lock().await;
        if pool.is_some() {
            return Ok(());
        }

        // Connections are kept for the database's whole life: closing the last
        // connection to an in-memory SQLite database destroys it.
        let opened = SqlitePoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(&self.config.url)
            .await?;
        info!(url = %self.config.url, "embedded database started");

        *pool = Some(opened);
        Ok(())
    }

    /// Close the database; a no-op when it is not running
    pub async fn stop(&self) {
        if let Some(pool) = self.pool.lock().await.take() {
            pool.close().await;
            info!(url = %self.config.url, "embedded database stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.pool.lock().await.is_some()
    }

    /// Handle to the running pool
    pub async fn pool(&self) -> Result<SqlitePool, QueryStoreError> {
        self.pool
            .lock()
            .await
            .clone()
            .ok_or(QueryStoreError::EmbeddedNotStarted)
    }

    /// Transactional data store over the running database
    pub async fn data_store(&self) -> Result<Arc<SqliteDataStore>, QueryStoreError> {
        Ok(Arc::new(SqliteDataStore::from_pool(self.pool().await?)))
    }

    /// Run a (multi-statement) SQL script, typically schema setup for a test
    pub async fn execute_script(&self, sql: &str) -> Result<(), QueryStoreError> {
        let pool = self.pool().await?;
        sqlx::raw_sql(sql).execute(&pool).await?;
        Ok(())
    }
}
