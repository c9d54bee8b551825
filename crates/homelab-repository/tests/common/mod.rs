//! Common test infrastructure for database integration tests.

use homelab_core::Service;
use homelab_repository::{DatabasePool, SqliteServiceRepository};
use std::sync::Arc;

/// Test database wrapper.
///
/// Each instance owns a private in-memory SQLite database with the schema
/// applied, so tests never share rows.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh database.
    pub async fn new() -> Self {
        let pool = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");

        Self {
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the database pool.
    #[allow(dead_code)]
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Returns a repository backed by this database.
    pub fn repository(&self) -> SqliteServiceRepository {
        SqliteServiceRepository::new(self.pool())
    }
}

/// Builds a valid, unsaved service.
pub fn sample_service(title: &str) -> Service {
    Service::new(
        title,
        format!("{} description", title),
        format!("http://{}.lan", title.to_lowercase()),
        None,
    )
}
