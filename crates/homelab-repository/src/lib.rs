//! # Homelab Repository
//!
//! Data access for the services catalog:
//!
//! ```text
//! Use cases
//!   ↓  Arc<dyn ServiceRepository>   (domain interface)
//! SqliteServiceRepository           (SQLx over DatabasePool)
//!   ↓
//! SQLite (<data_dir>/homelab.db)
//! ```
//!
//! [`InMemoryServiceRepository`] implements the same trait without a
//! database and is selected at composition time for tests.

pub mod memory;
pub mod pool;
pub mod sqlite;
pub mod traits;

pub use memory::InMemoryServiceRepository;
pub use pool::*;
pub use sqlite::SqliteServiceRepository;
pub use traits::*;
