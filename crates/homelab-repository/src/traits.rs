//! Repository trait definitions.

use async_trait::async_trait;
use homelab_core::{HomelabResult, Service, ServiceId};

/// Persistence gateway for services.
///
/// Writes validate the entity first; nothing is written when validation
/// fails.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Returns every service, ordered by id.
    async fn find_all(&self) -> HomelabResult<Vec<Service>>;

    /// Finds a service by id. A missing row is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: ServiceId) -> HomelabResult<Option<Service>>;

    /// Inserts a new service and returns it with its generated id.
    async fn create(&self, service: &Service) -> HomelabResult<Service>;

    /// Replaces every column of the service with the given id.
    async fn update(&self, id: ServiceId, service: &Service) -> HomelabResult<Service>;

    /// Deletes a service by id.
    async fn delete(&self, id: ServiceId) -> HomelabResult<()>;
}

/// Resource name used in not-found errors.
pub(crate) const SERVICE_RESOURCE: &str = "Service";
