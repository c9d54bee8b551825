//! Process-local repository implementations.

mod service_repository;

pub use service_repository::InMemoryServiceRepository;
