//! Core QueryStore functionality
//!
//! This module contains the main QueryStore struct: it owns the connection pool, the
//! data store built on it, and a registry of named object stores.

use sqlx::PgPool;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use store_object::{
    FilterDao, FilteredObjectStore, KeyValueDao, ObjectStore, PgDataStore,
};
use tracing::info;

use crate::errors::QueryStoreError;
use config::DatabaseConfig;

/// Main QueryStore coordinator that manages the database pool and named object stores
pub struct QueryStore {
    data_store: Arc<PgDataStore>,
    stores: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for QueryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStore")
            .field("stores", &self.list_stores())
            .finish()
    }
}

impl QueryStore {
    /// Create new QueryStore with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, QueryStoreError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        info!(
            host = %config.host,
            database = %config.database,
            "database pool established"
        );

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            data_store: Arc::new(PgDataStore::from_pool(pool)),
            stores: HashMap::new(),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        self.data_store.pool()
    }

    /// The transactional data store shared by every object store created here
    pub fn data_store(&self) -> Arc<PgDataStore> {
        self.data_store.clone()
    }

    /// Key-value object store over `dao`
    pub fn object_store<D>(&self, dao: D) -> ObjectStore<PgDataStore, D>
    where
        D: KeyValueDao<Context = sqlx::PgConnection>,
    {
        ObjectStore::new(self.data_store(), Arc::new(dao))
    }

    /// Filtered object store over `dao`
    pub fn filtered_store<D>(&self, dao: D) -> FilteredObjectStore<PgDataStore, D>
    where
        D: FilterDao<Context = sqlx::PgConnection>,
    {
        FilteredObjectStore::new(self.data_store(), Arc::new(dao))
    }

    /// Register an object store under a given name
    pub fn register_store<T>(&mut self, name: String, store: T) -> Result<(), QueryStoreError>
    where
        T: Send + Sync + 'static,
    {
        if self.stores.contains_key(&name) {
            return Err(QueryStoreError::StoreAlreadyRegistered(name));
        }

        self.stores.insert(name, Box::new(store));
        Ok(())
    }

    /// Get a registered object store by name
    pub fn get_store<T>(&self, name: &str) -> Result<&T, QueryStoreError>
    where
        T: Send + Sync + 'static,
    {
        self.stores
            .get(name)
            .and_then(|store| store.downcast_ref::<T>())
            .ok_or_else(|| QueryStoreError::StoreNotFound(name.to_string()))
    }

    /// List all registered store names, sorted
    pub fn list_stores(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.stores.keys().collect();
        names.sort();
        names
    }

    /// Remove an object store by name
    pub fn unregister_store(&mut self, name: &str) -> Result<(), QueryStoreError> {
        self.stores
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| QueryStoreError::StoreNotFound(name.to_string()))
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QueryStoreError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }
}
