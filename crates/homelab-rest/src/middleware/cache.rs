//! Response caching middleware.
//!
//! [`read_through`] serves GET responses from the cache and stores fresh 200
//! JSON bodies on a miss. [`invalidate_on_success`] drops matching keys after
//! a mutation succeeds. Both are attached per route with
//! `axum::middleware::from_fn_with_state`, using the settings built by
//! [`CacheLayer`].

use axum::{
    body::{to_bytes, Body},
    extract::{OriginalUri, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use homelab_service::{cache_keys, CacheInterface};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Response header reporting whether the cache answered.
pub const X_CACHE: &str = "x-cache";

/// Derives the key suffix for a request.
pub type KeyFn = Arc<dyn Fn(&Request<Body>) -> String + Send + Sync>;

/// Factory for the cache middleware settings.
#[derive(Clone)]
pub struct CacheLayer {
    cache: Arc<dyn CacheInterface>,
}

impl CacheLayer {
    /// Creates a factory over the given backend.
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }

    /// Read-through settings: keys are `<prefix>:<key_fn(request)>`.
    ///
    /// Without a `key_fn` the original path and query are used. Without a
    /// `ttl` the backend default applies.
    pub fn cache(
        &self,
        prefix: &str,
        key_fn: Option<KeyFn>,
        ttl: Option<Duration>,
    ) -> ReadThroughCache {
        ReadThroughCache {
            cache: Arc::clone(&self.cache),
            prefix: prefix.to_string(),
            key_fn: key_fn.unwrap_or_else(|| Arc::new(original_uri_key)),
            ttl,
        }
    }

    /// Invalidation settings for a glob pattern such as `services:*`.
    pub fn invalidate(&self, pattern: &str) -> InvalidateCache {
        InvalidateCache {
            cache: Arc::clone(&self.cache),
            pattern: pattern.to_string(),
        }
    }

    /// Key function that maps `/.../<id>` to `id:<id>`.
    pub fn by_id() -> KeyFn {
        Arc::new(|request: &Request<Body>| {
            let id = request
                .uri()
                .path()
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or_default();
            cache_keys::id_suffix(id)
        })
    }
}

/// State for [`read_through`].
#[derive(Clone)]
pub struct ReadThroughCache {
    cache: Arc<dyn CacheInterface>,
    prefix: String,
    key_fn: KeyFn,
    ttl: Option<Duration>,
}

impl ReadThroughCache {
    /// Cache key for a request.
    pub fn key_for(&self, request: &Request<Body>) -> String {
        cache_keys::key(&self.prefix, &(self.key_fn)(request))
    }
}

/// State for [`invalidate_on_success`].
#[derive(Clone)]
pub struct InvalidateCache {
    cache: Arc<dyn CacheInterface>,
    pattern: String,
}

/// Default key function: path and query as the client sent them.
fn original_uri_key(request: &Request<Body>) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri(), |original| &original.0);

    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string())
}

/// Serves GET requests from the cache, populating it on a miss.
///
/// Cache failures are logged and the request proceeds uncached. Without a
/// connected backend the request passes through untouched.
pub async fn read_through(
    State(settings): State<ReadThroughCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET || !settings.cache.is_connected() {
        return next.run(request).await;
    }

    let key = settings.key_for(&request);

    match settings.cache.get_raw(&key).await {
        Ok(Some(cached)) => {
            debug!("Serving '{}' from cache", key);
            return json_response(cached, "HIT");
        }
        Ok(None) => {}
        Err(e) => warn!("Cache lookup failed for '{}': {}", key, e),
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK || !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer response for '{}': {}", key, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "").into_response();
        }
    };

    if let Ok(payload) = std::str::from_utf8(&bytes) {
        if let Err(e) = settings.cache.set_raw(&key, payload, settings.ttl).await {
            warn!("Failed to cache '{}': {}", key, e);
        }
    }

    parts.headers.insert(X_CACHE, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

/// Runs the mutation, then drops matching cache entries if it succeeded.
///
/// The response is returned unchanged whether or not invalidation works.
pub async fn invalidate_on_success(
    State(settings): State<InvalidateCache>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if response.status().is_success() {
        match settings.cache.invalidate_pattern(&settings.pattern).await {
            Ok(true) => debug!("Invalidated cache keys matching '{}'", settings.pattern),
            Ok(false) => debug!("Cache not connected, skipped invalidating '{}'", settings.pattern),
            Err(e) => warn!("Failed to invalidate '{}': {}", settings.pattern, e),
        }
    }

    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn json_response(payload: String, cache_status: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::HeaderName::from_static(X_CACHE), HeaderValue::from_static(cache_status)),
        ],
        payload,
    )
        .into_response()
}
