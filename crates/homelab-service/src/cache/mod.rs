//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] abstracts the response cache. Two backends implement
//! it: [`RedisCacheService`] for shared deployments and
//! [`InMemoryCacheService`] for single-process runs and tests. A backend
//! that is not connected turns every operation into a no-op.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheInterface, CacheStatus};
pub use memory_cache::{glob_match, InMemoryCacheService};
pub use redis_cache::RedisCacheService;
