//! Domain entities.

mod service;

pub use service::{Service, ServiceDto};
