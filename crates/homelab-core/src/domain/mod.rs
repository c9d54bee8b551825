//! Domain entities of the services catalog.

pub mod entities;

pub use entities::*;
