//! Redis-based cache implementation.

use super::{CacheInterface, CacheStatus};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use homelab_config::CacheConfig;
use homelab_core::{HomelabError, HomelabResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redis-based cache service.
///
/// Every key is stored under `<key_prefix>:` so several deployments can share
/// one Redis instance.
pub struct RedisCacheService {
    /// Redis connection pool, `None` when caching is disabled.
    pool: Option<Pool>,
    connected: AtomicBool,
    key_prefix: String,
    default_ttl: Duration,
}

impl RedisCacheService {
    /// Creates a Redis cache service from configuration.
    ///
    /// No connection is made until [`connect`](CacheInterface::connect).
    pub fn new(config: &CacheConfig) -> HomelabResult<Self> {
        let pool = Config::from_url(&config.redis_url)
            .builder()
            .map_err(|e| HomelabError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| HomelabError::Configuration(format!("Failed to create pool: {}", e)))?;

        Ok(Self {
            pool: Some(pool),
            connected: AtomicBool::new(false),
            key_prefix: config.key_prefix.clone(),
            default_ttl: config.ttl(),
        })
    }

    /// Create a no-op cache service (for when caching is disabled).
    #[must_use]
    pub fn disabled(config: &CacheConfig) -> Self {
        Self {
            pool: None,
            connected: AtomicBool::new(false),
            key_prefix: config.key_prefix.clone(),
            default_ttl: config.ttl(),
        }
    }

    /// Applies the deployment namespace to a key or pattern.
    fn namespaced(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }

    /// Marks the backend unreachable so later calls become no-ops.
    fn mark_disconnected(&self, context: &str, error: &dyn std::fmt::Display) {
        if self.connected.swap(false, Ordering::SeqCst) {
            warn!("Redis {} failed, continuing without cache: {}", context, error);
        } else {
            debug!("Redis {} failed: {}", context, error);
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> HomelabResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                HomelabError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(HomelabError::Cache("Cache is disabled".to_string())),
        }
    }

    /// A pooled connection while connected; `None` after marking the
    /// backend unreachable.
    async fn live_conn(&self) -> Option<deadpool_redis::Connection> {
        if !self.is_connected() {
            return None;
        }

        match self.get_conn().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                self.mark_disconnected("checkout", &e);
                None
            }
        }
    }

    async fn ping(&self) -> HomelabResult<()> {
        let mut conn = self.get_conn().await?;
        deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| HomelabError::Cache(format!("PING failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn connect(&self) -> bool {
        if self.pool.is_none() {
            info!("Redis cache disabled");
            return false;
        }

        match self.ping().await {
            Ok(()) => {
                self.connected.store(true, Ordering::SeqCst);
                info!("Connected to Redis");
                true
            }
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                warn!("Redis unavailable, continuing without cache: {}", e);
                false
            }
        }
    }

    async fn get_raw(&self, key: &str) -> HomelabResult<Option<String>> {
        let Some(mut conn) = self.live_conn().await else {
            return Ok(None);
        };

        match conn.get::<_, Option<String>>(self.namespaced(key)).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                Ok(None)
            }
            Err(e) => {
                self.mark_disconnected("GET", &e);
                Ok(None)
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> HomelabResult<bool> {
        let Some(mut conn) = self.live_conn().await else {
            return Ok(false);
        };
        let ttl_secs = ttl.unwrap_or(self.default_ttl).as_secs().max(1);

        match conn.set_ex::<_, _, ()>(self.namespaced(key), value, ttl_secs).await {
            Ok(()) => {
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
                Ok(true)
            }
            Err(e) => {
                self.mark_disconnected("SET", &e);
                Ok(false)
            }
        }
    }

    async fn invalidate(&self, key: &str) -> HomelabResult<bool> {
        let Some(mut conn) = self.live_conn().await else {
            return Ok(false);
        };

        match conn.del::<_, i64>(self.namespaced(key)).await {
            Ok(deleted) => {
                debug!("Deleted key '{}': {}", key, deleted > 0);
                Ok(true)
            }
            Err(e) => {
                self.mark_disconnected("DEL", &e);
                Ok(false)
            }
        }
    }

    async fn invalidate_pattern(&self, pattern: &str) -> HomelabResult<bool> {
        let Some(mut conn) = self.live_conn().await else {
            return Ok(false);
        };

        // KEYS blocks the server; acceptable for a catalog of this size.
        let keys: Vec<String> = match deadpool_redis::redis::cmd("KEYS")
            .arg(self.namespaced(pattern))
            .query_async(&mut *conn)
            .await
        {
            Ok(keys) => keys,
            Err(e) => {
                self.mark_disconnected("KEYS", &e);
                return Ok(false);
            }
        };

        if keys.is_empty() {
            return Ok(true);
        }

        match conn.del::<_, i64>(&keys).await {
            Ok(deleted) => {
                debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
                Ok(true)
            }
            Err(e) => {
                self.mark_disconnected("DEL", &e);
                Ok(false)
            }
        }
    }

    async fn close(&self) {
        self.connected.store(false, Ordering::SeqCst);
        if let Some(pool) = &self.pool {
            pool.close();
            info!("Redis connection pool closed");
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn status(&self) -> CacheStatus {
        CacheStatus {
            backend: "redis",
            enabled: self.pool.is_some(),
            connected: self.is_connected(),
            default_ttl_secs: self.default_ttl.as_secs(),
        }
    }
}
