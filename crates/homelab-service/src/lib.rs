//! # Homelab Service
//!
//! Use-case layer for the services catalog, plus the cache backends the
//! REST layer reads through.

pub mod cache;
pub mod r#impl;
pub mod service_use_cases;

pub use cache::*;
pub use r#impl::ServiceUseCasesImpl;
pub use service_use_cases::*;
