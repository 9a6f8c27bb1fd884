//! Storage layer for the service
//!
//! Repositories are reached through trait objects so services do not care
//! whether rows live in SQL or in memory.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;
/// Repository traits
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{ContextElementRepository, UserRepository};

use crate::config::DatabaseConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Concrete backend behind the repositories
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Database(Arc<database::Database>),
    Memory(Arc<MemoryStore>),
}

/// Repositories plus the backend that serves them
#[derive(Clone)]
pub struct StorageLayer {
    pub users: Arc<dyn UserRepository>,
    pub elements: Arc<dyn ContextElementRepository>,
    backend: StorageBackend,
}

impl std::fmt::Debug for StorageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLayer")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl StorageLayer {
    /// Open the configured backend and run migrations
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Initializing storage layer");

        if config.is_memory() {
            debug!("Using in-memory storage");
            return Ok(Self::memory());
        }

        let database = Arc::new(database::Database::new(config).await?);
        database.migrate().await?;
        Ok(Self::from_database(database))
    }

    /// Storage backed by a fresh [`MemoryStore`]
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            elements: store.clone(),
            backend: StorageBackend::Memory(store),
        }
    }

    pub fn from_database(database: Arc<database::Database>) -> Self {
        Self {
            users: database.clone(),
            elements: database.clone(),
            backend: StorageBackend::Database(database),
        }
    }

    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        match &self.backend {
            StorageBackend::Database(database) => database.health_check().await,
            StorageBackend::Memory(_) => Ok(()),
        }
    }

    /// Release backend resources
    pub async fn close(&self) -> Result<()> {
        match &self.backend {
            StorageBackend::Database(database) => {
                info!("Closing database connections");
                database.close().await
            }
            StorageBackend::Memory(_) => Ok(()),
        }
    }
}
