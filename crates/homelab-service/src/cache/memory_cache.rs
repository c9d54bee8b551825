//! In-process cache backed by a `DashMap`.

use super::{CacheInterface, CacheStatus};
use async_trait::async_trait;
use dashmap::DashMap;
use homelab_core::HomelabResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Process-local cache.
///
/// Entries never expire; they live until invalidated or until `close`.
pub struct InMemoryCacheService {
    entries: DashMap<String, String>,
    enabled: bool,
    connected: AtomicBool,
    default_ttl: Duration,
}

impl InMemoryCacheService {
    /// Creates an empty, not yet connected cache.
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            enabled: true,
            connected: AtomicBool::new(false),
            default_ttl,
        }
    }

    /// Creates a cache that stays disconnected (for `cache.enabled = false`).
    #[must_use]
    pub fn disabled(default_ttl: Duration) -> Self {
        Self {
            enabled: false,
            ..Self::new(default_ttl)
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn connect(&self) -> bool {
        if self.enabled {
            self.connected.store(true, Ordering::SeqCst);
            info!("In-memory cache ready");
        }
        self.is_connected()
    }

    async fn get_raw(&self, key: &str) -> HomelabResult<Option<String>> {
        if !self.is_connected() {
            return Ok(None);
        }

        let value = self.entries.get(key).map(|entry| entry.value().clone());
        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Option<Duration>) -> HomelabResult<bool> {
        if !self.is_connected() {
            return Ok(false);
        }

        self.entries.insert(key.to_string(), value.to_string());
        debug!("Cached key '{}'", key);
        Ok(true)
    }

    async fn invalidate(&self, key: &str) -> HomelabResult<bool> {
        if !self.is_connected() {
            return Ok(false);
        }

        self.entries.remove(key);
        Ok(true)
    }

    async fn invalidate_pattern(&self, pattern: &str) -> HomelabResult<bool> {
        if !self.is_connected() {
            return Ok(false);
        }

        let before = self.entries.len();
        self.entries.retain(|key, _| !glob_match(pattern, key));
        debug!(
            "Deleted {} keys matching pattern '{}'",
            before.saturating_sub(self.entries.len()),
            pattern
        );
        Ok(true)
    }

    async fn close(&self) {
        self.entries.clear();
        self.connected.store(false, Ordering::SeqCst);
        info!("In-memory cache closed");
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn status(&self) -> CacheStatus {
        CacheStatus {
            backend: "memory",
            enabled: self.enabled,
            connected: self.is_connected(),
            default_ttl_secs: self.default_ttl.as_secs(),
        }
    }
}

/// Matches `key` against a Redis-style glob where `*` matches any run of
/// characters and `?` matches exactly one. The whole key must match.
#[must_use]
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    // Position of the last `*` seen and the key index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, k));
                p += 1;
            }
            Some('?') => {
                p += 1;
                k += 1;
            }
            Some(c) if *c == key[k] => {
                p += 1;
                k += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    k = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connected_cache() -> InMemoryCacheService {
        let cache = InMemoryCacheService::new(Duration::from_secs(60));
        assert!(cache.connect().await);
        cache
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("services:*", "services:/api/services"));
        assert!(glob_match("services:*", "services:id:1"));
        assert!(glob_match("services:*", "services:"));
        assert!(glob_match("services:id:?", "services:id:7"));
        assert!(!glob_match("services:id:?", "services:id:17"));
        assert!(glob_match("*:id:*", "services:id:17"));
        assert!(!glob_match("services:*", "other:services:1"));
        assert!(!glob_match("services", "services:id:1"));
        assert!(glob_match("a*b*c", "axxbyyc"));
        assert!(!glob_match("a*b*c", "axxbyy"));
    }

    #[tokio::test]
    async fn test_noop_before_connect() {
        let cache = InMemoryCacheService::new(Duration::from_secs(60));
        assert!(!cache.is_connected());
        assert!(!cache.set_raw("k", "v", None).await.unwrap());
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
        assert!(!cache.invalidate_pattern("*").await.unwrap());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_never_connects() {
        let cache = InMemoryCacheService::disabled(Duration::from_secs(60));
        assert!(!cache.connect().await);
        assert!(!cache.status().enabled);
        assert!(!cache.set_raw("k", "v", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_get_invalidate() {
        let cache = connected_cache().await;
        assert!(cache.set_raw("services:id:1", r#"{"id":1}"#, None).await.unwrap());
        assert_eq!(
            cache.get_raw("services:id:1").await.unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );

        assert!(cache.invalidate("services:id:1").await.unwrap());
        assert_eq!(cache.get_raw("services:id:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate_pattern_only_touches_matches() {
        let cache = connected_cache().await;
        cache.set_raw("services:/api/services", "[]", None).await.unwrap();
        cache.set_raw("services:id:2", "{}", None).await.unwrap();
        cache.set_raw("sessions:abc", "{}", None).await.unwrap();

        assert!(cache.invalidate_pattern("services:*").await.unwrap());
        assert_eq!(cache.len(), 1);
        assert!(cache.get_raw("sessions:abc").await.unwrap().is_some());

        // Nothing left to match is still a success.
        assert!(cache.invalidate_pattern("services:*").await.unwrap());
    }

    #[tokio::test]
    async fn test_typed_get_set() {
        let cache = connected_cache().await;
        let value = vec!["grafana".to_string(), "loki".to_string()];
        assert!(cache.set("list", &value, None).await.unwrap());

        let loaded: Option<Vec<String>> = cache.get("list").await.unwrap();
        assert_eq!(loaded, Some(value));
    }

    #[tokio::test]
    async fn test_close_clears_and_disconnects() {
        let cache = connected_cache().await;
        cache.set_raw("k", "v", None).await.unwrap();
        cache.close().await;

        assert!(!cache.is_connected());
        assert!(cache.is_empty());
        assert_eq!(
            cache.status(),
            CacheStatus {
                backend: "memory",
                enabled: true,
                connected: false,
                default_ttl_secs: 60,
            }
        );
    }
}
