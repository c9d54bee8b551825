//! In-memory service repository.

use crate::traits::{ServiceRepository, SERVICE_RESOURCE};
use async_trait::async_trait;
use homelab_core::{HomelabError, HomelabResult, Service, ServiceId, ValidateExt};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Store {
    rows: BTreeMap<ServiceId, Service>,
    last_id: i64,
}

/// Process-local repository with an autoincrementing id sequence.
///
/// Ids are never reused after a delete, matching SQLite `AUTOINCREMENT`.
#[derive(Default)]
pub struct InMemoryServiceRepository {
    store: RwLock<Store>,
}

impl InMemoryServiceRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn find_all(&self) -> HomelabResult<Vec<Service>> {
        Ok(self.store.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ServiceId) -> HomelabResult<Option<Service>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, service: &Service) -> HomelabResult<Service> {
        service.validate_request()?;

        let mut store = self.store.write().await;
        store.last_id += 1;
        let id = ServiceId::new(store.last_id);
        let created = service.clone().with_id(id);
        store.rows.insert(id, created.clone());
        debug!("Created in-memory service {}", id);

        Ok(created)
    }

    async fn update(&self, id: ServiceId, service: &Service) -> HomelabResult<Service> {
        service.validate_request()?;

        let mut store = self.store.write().await;
        let row = store
            .rows
            .get_mut(&id)
            .ok_or_else(|| HomelabError::not_found(SERVICE_RESOURCE, id))?;
        *row = service.clone().with_id(id);

        Ok(row.clone())
    }

    async fn delete(&self, id: ServiceId) -> HomelabResult<()> {
        self.store
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| HomelabError::not_found(SERVICE_RESOURCE, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(title: &str) -> Service {
        Service::new(title, "desc", "http://host.lan", None)
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repo = InMemoryServiceRepository::new();
        let first = repo.create(&service("a")).await.unwrap();
        repo.delete(first.id.unwrap()).await.unwrap();

        let second = repo.create(&service("b")).await.unwrap();
        assert_eq!(second.id, Some(ServiceId::new(2)));
    }

    #[tokio::test]
    async fn test_created_service_is_stored_under_its_id() {
        let repo = InMemoryServiceRepository::new();
        let created = repo.create(&service("grafana")).await.unwrap();
        let id = created.id.unwrap();

        assert_eq!(id, ServiceId::new(1));
        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryServiceRepository::new();
        for title in ["c", "a", "b"] {
            repo.create(&service(title)).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|s| s.id.map(ServiceId::into_inner))
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let repo = InMemoryServiceRepository::new();
        let err = repo.create(&service(" ")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let repo = InMemoryServiceRepository::new();
        let id = ServiceId::new(9);
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.update(id, &service("x")).await.unwrap_err().status_code(), 404);
        assert_eq!(repo.delete(id).await.unwrap_err().status_code(), 404);
    }
}
