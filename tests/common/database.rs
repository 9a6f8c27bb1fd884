//! Test database utilities
//!
//! Provides in-memory SQLite database for testing without external dependencies.
//! Each test gets an isolated database instance using SeaORM.

use cese_backend::config::DatabaseConfig;
use cese_backend::storage::StorageLayer;
use cese_backend::storage::database::Database;
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    ///
    /// Each call creates a completely isolated database instance.
    pub async fn new() -> Self {
        Self {
            inner: Arc::new(create_test_db().await),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }

    /// Storage layer serving both repositories from this database
    pub fn storage(&self) -> StorageLayer {
        StorageLayer::from_database(self.db_arc())
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1, // In-memory DB only supports 1 connection
        connection_timeout: 5,
    }
}

/// Create a standalone test database (convenience function)
pub async fn create_test_db() -> Database {
    let config = test_db_config();
    let db = Database::new(&config)
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_layer_over_test_db() {
        let db = TestDatabase::new().await;
        let storage = db.storage();
        assert!(storage.health_check().await.is_ok());
    }
}
