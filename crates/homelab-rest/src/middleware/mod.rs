//! HTTP middleware.

pub mod cache;
mod logging;

pub use cache::{
    invalidate_on_success, read_through, CacheLayer, InvalidateCache, KeyFn, ReadThroughCache,
};
pub use logging::logging_middleware;
