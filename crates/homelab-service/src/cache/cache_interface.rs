//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use homelab_core::HomelabResult;
use serde::Serialize;
use std::time::Duration;

/// Connectivity snapshot reported by `/api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    /// Backend name (`redis` or `memory`).
    pub backend: &'static str,
    /// Whether caching is configured on.
    pub enabled: bool,
    /// Whether the backend is currently reachable.
    pub connected: bool,
    /// TTL applied when a caller does not give one.
    pub default_ttl_secs: u64,
}

/// Cache interface for storing and retrieving cached data.
///
/// Values are JSON strings so the trait stays dyn-compatible. While the
/// backend is not connected, reads return `Ok(None)` and writes return
/// `Ok(false)`; callers never need to tell "empty" from "unreachable".
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Establishes the backend connection. Returns whether it succeeded.
    ///
    /// Failure is logged and leaves the cache in its no-op state.
    async fn connect(&self) -> bool;

    /// Get a raw JSON value from the cache.
    async fn get_raw(&self, key: &str) -> HomelabResult<Option<String>>;

    /// Store a raw JSON value. `None` uses the backend's default TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> HomelabResult<bool>;

    /// Delete a single key.
    async fn invalidate(&self, key: &str) -> HomelabResult<bool>;

    /// Delete every key matching a glob pattern (`*`, `?`).
    ///
    /// An empty match set is a successful no-op.
    async fn invalidate_pattern(&self, pattern: &str) -> HomelabResult<bool>;

    /// Releases the backend.
    async fn close(&self);

    /// Check if the backend is connected.
    fn is_connected(&self) -> bool;

    /// Returns a connectivity snapshot.
    fn status(&self) -> CacheStatus;
}
