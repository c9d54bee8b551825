//! Composition root.
//!
//! Builds the object graph once at startup and owns the resources that must
//! be released on shutdown:
//!
//! ```text
//! DatabasePool ──► SqliteServiceRepository ──► ServiceUseCasesImpl ──┐
//!                                                                     ├──► AppState
//! CacheConfig  ──► RedisCacheService | InMemoryCacheService ─────────┘
//! ```

use axum::Router;
use homelab_config::{AppConfig, CacheBackendKind, CacheConfig, ServerConfig};
use homelab_core::{HealthCheck, HomelabResult};
use homelab_repository::{create_pool, DatabasePool, ServiceRepository, SqliteServiceRepository};
use homelab_rest::{create_router, AppState};
use homelab_service::{
    CacheInterface, InMemoryCacheService, RedisCacheService, ServiceUseCases, ServiceUseCasesImpl,
};
use std::sync::Arc;
use tracing::info;

/// Owns every long-lived component of the application.
pub struct AppContainer {
    server: ServerConfig,
    database: Arc<DatabasePool>,
    use_cases: Arc<dyn ServiceUseCases>,
    cache: Arc<dyn CacheInterface>,
}

impl AppContainer {
    /// Opens the database, builds and connects the configured cache, and
    /// wires the use cases.
    ///
    /// An unreachable cache is not an error; the application runs uncached.
    pub async fn initialize(config: &AppConfig) -> HomelabResult<Self> {
        let database = create_pool(&config.database).await?;
        let repository: Arc<dyn ServiceRepository> =
            Arc::new(SqliteServiceRepository::new(Arc::clone(&database)));
        let cache = build_cache(&config.cache)?;

        Ok(Self::from_parts(config.server.clone(), database, repository, cache).await)
    }

    /// Fully in-process graph: in-memory SQLite and in-memory cache.
    pub async fn in_memory() -> HomelabResult<Self> {
        let config = AppConfig::default();
        let database = Arc::new(DatabasePool::in_memory().await?);
        let repository: Arc<dyn ServiceRepository> =
            Arc::new(SqliteServiceRepository::new(Arc::clone(&database)));
        let cache: Arc<dyn CacheInterface> =
            Arc::new(InMemoryCacheService::new(config.cache.ttl()));

        Ok(Self::from_parts(config.server, database, repository, cache).await)
    }

    /// Wires explicitly chosen components and connects the cache.
    pub async fn from_parts(
        server: ServerConfig,
        database: Arc<DatabasePool>,
        repository: Arc<dyn ServiceRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        cache.connect().await;

        let use_cases: Arc<dyn ServiceUseCases> = Arc::new(ServiceUseCasesImpl::new(repository));

        info!(
            "Application container ready (cache backend: {}, connected: {})",
            cache.status().backend,
            cache.is_connected()
        );

        Self {
            server,
            database,
            use_cases,
            cache,
        }
    }

    /// Shared handler state.
    pub fn state(&self) -> AppState {
        let database: Arc<dyn HealthCheck> = self.database.clone();
        AppState::new(Arc::clone(&self.use_cases), Arc::clone(&self.cache), database)
    }

    /// The HTTP router over this container's state.
    pub fn router(&self) -> Router {
        create_router(self.state(), &self.server)
    }

    /// The cache backend.
    pub fn cache(&self) -> &Arc<dyn CacheInterface> {
        &self.cache
    }

    /// The database pool.
    pub fn database(&self) -> &Arc<DatabasePool> {
        &self.database
    }

    /// Releases the cache and the database pool.
    pub async fn close(&self) {
        info!("Shutting down application container...");
        self.cache.close().await;
        self.database.close().await;
    }
}

/// Builds the cache backend selected by configuration.
pub fn build_cache(config: &CacheConfig) -> HomelabResult<Arc<dyn CacheInterface>> {
    let cache: Arc<dyn CacheInterface> = match (config.enabled, config.backend) {
        (true, CacheBackendKind::Redis) => Arc::new(RedisCacheService::new(config)?),
        (false, CacheBackendKind::Redis) => Arc::new(RedisCacheService::disabled(config)),
        (true, CacheBackendKind::Memory) => Arc::new(InMemoryCacheService::new(config.ttl())),
        (false, CacheBackendKind::Memory) => Arc::new(InMemoryCacheService::disabled(config.ttl())),
    };
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cache_selects_backend() {
        let memory = CacheConfig {
            backend: CacheBackendKind::Memory,
            ..CacheConfig::default()
        };
        assert_eq!(build_cache(&memory).unwrap().status().backend, "memory");

        let redis = build_cache(&CacheConfig::default()).unwrap();
        assert_eq!(redis.status().backend, "redis");
        assert!(redis.status().enabled);

        let disabled = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        assert!(!build_cache(&disabled).unwrap().status().enabled);
    }

    #[tokio::test]
    async fn test_state_checks_the_container_database() {
        let container = AppContainer::in_memory().await.unwrap();
        let state = container.state();
        assert!(state.database.check().await.is_healthy());

        container.database().close().await;
        assert!(state.database.check().await.is_unhealthy());
    }

    #[tokio::test]
    async fn test_in_memory_container_connects_and_closes() {
        let container = AppContainer::in_memory().await.unwrap();
        assert!(container.cache().is_connected());
        assert!(container.database().health_check().await.is_ok());

        container.close().await;
        assert!(!container.cache().is_connected());
        assert!(container.database().is_closed());
    }
}
