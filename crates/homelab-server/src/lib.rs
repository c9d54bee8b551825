//! # Homelab Server Library
//!
//! Composition root, logging setup and startup utilities for the services
//! catalog server.

pub mod container;
pub mod logging;
pub mod shutdown;
pub mod startup;

pub use container::AppContainer;
