//! Service use-case implementation.

use crate::service_use_cases::ServiceUseCases;
use async_trait::async_trait;
use homelab_core::{HomelabResult, Service, ServiceDto, ServiceId};
use homelab_repository::ServiceRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Use cases backed by a [`ServiceRepository`].
pub struct ServiceUseCasesImpl {
    repository: Arc<dyn ServiceRepository>,
}

impl ServiceUseCasesImpl {
    /// Creates the use cases over the given repository.
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ServiceUseCases for ServiceUseCasesImpl {
    async fn get_all_services(&self) -> HomelabResult<Vec<ServiceDto>> {
        debug!("Listing services");

        let services = self.repository.find_all().await?;
        Ok(services.into_iter().map(ServiceDto::from).collect())
    }

    async fn get_service_by_id(&self, id: ServiceId) -> HomelabResult<Option<ServiceDto>> {
        debug!("Getting service: {}", id);

        let service = self.repository.find_by_id(id).await?;
        Ok(service.map(ServiceDto::from))
    }

    async fn create_service(&self, dto: ServiceDto) -> HomelabResult<ServiceDto> {
        debug!("Creating service: {}", dto.title);

        let mut service = Service::from_dto(dto);
        service.id = None;
        let created = self.repository.create(&service).await?;

        if let Some(id) = created.id {
            info!("Service created: {}", id);
        }
        Ok(created.into())
    }

    async fn update_service(&self, id: ServiceId, dto: ServiceDto) -> HomelabResult<ServiceDto> {
        debug!("Updating service: {}", id);

        let service = Service::from_dto(dto).with_id(id);
        let updated = self.repository.update(id, &service).await?;

        info!("Service updated: {}", id);
        Ok(updated.into())
    }

    async fn delete_service(&self, id: ServiceId) -> HomelabResult<()> {
        debug!("Deleting service: {}", id);

        self.repository.delete(id).await?;

        info!("Service deleted: {}", id);
        Ok(())
    }
}
