//! # Homelab REST
//!
//! REST API layer using Axum for the services catalog.
//! Provides the `/api/services` CRUD endpoints behind a read-through
//! response cache, plus health and status endpoints.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
