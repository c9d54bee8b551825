//! Service use-case trait definition.

use async_trait::async_trait;
use homelab_core::{HomelabResult, ServiceDto, ServiceId};

/// Operations exposed to the HTTP layer.
#[async_trait]
pub trait ServiceUseCases: Send + Sync {
    /// Lists every service.
    async fn get_all_services(&self) -> HomelabResult<Vec<ServiceDto>>;

    /// Gets a service by id, `None` when it does not exist.
    async fn get_service_by_id(&self, id: ServiceId) -> HomelabResult<Option<ServiceDto>>;

    /// Creates a service from a DTO. Any `id` in the DTO is ignored.
    async fn create_service(&self, dto: ServiceDto) -> HomelabResult<ServiceDto>;

    /// Replaces the service with the given id.
    async fn update_service(&self, id: ServiceId, dto: ServiceDto) -> HomelabResult<ServiceDto>;

    /// Deletes a service.
    async fn delete_service(&self, id: ServiceId) -> HomelabResult<()>;
}
