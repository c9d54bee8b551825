//! # Homelab Config
//!
//! Configuration management for the homelab services catalog.
//! Supports layered configuration from TOML files, prefixed environment
//! variables, and the flat variables used by existing deployments.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
