//! Cache key generators for consistent key naming.

/// Prefix for every cached service response.
pub const SERVICES_PREFIX: &str = "services";

/// Joins a prefix and a suffix into a cache key.
#[must_use]
pub fn key(prefix: &str, suffix: &str) -> String {
    format!("{}:{}", prefix, suffix)
}

/// Suffix used for single-service lookups.
#[must_use]
pub fn id_suffix(id: &str) -> String {
    format!("id:{}", id)
}

/// Pattern matching every cached service response.
#[must_use]
pub fn services_pattern() -> String {
    key(SERVICES_PREFIX, "*")
}
