//! SQLite service repository implementation.

use crate::traits::{ServiceRepository, SERVICE_RESOURCE};
use crate::DatabasePool;
use async_trait::async_trait;
use homelab_core::{HomelabError, HomelabResult, Service, ServiceId, ValidateExt};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite service repository implementation.
#[derive(Clone)]
pub struct SqliteServiceRepository {
    pool: Arc<DatabasePool>,
}

impl SqliteServiceRepository {
    /// Creates a new SQLite service repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a service.
#[derive(Debug, FromRow)]
struct ServiceRow {
    id: i64,
    title: String,
    description: String,
    link: String,
    #[sqlx(rename = "imageUrl")]
    image_url: Option<String>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: Some(ServiceId::new(row.id)),
            title: row.title,
            description: row.description,
            link: row.link,
            image_url: row.image_url,
        }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepository {
    async fn find_all(&self) -> HomelabResult<Vec<Service>> {
        debug!("Finding all services");

        let rows = sqlx::query_as::<_, ServiceRow>(
            r#"
            SELECT id, title, description, link, imageUrl
            FROM services
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn find_by_id(&self, id: ServiceId) -> HomelabResult<Option<Service>> {
        debug!("Finding service by id: {}", id);

        let row = sqlx::query_as::<_, ServiceRow>(
            r#"
            SELECT id, title, description, link, imageUrl
            FROM services
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Service::from))
    }

    async fn create(&self, service: &Service) -> HomelabResult<Service> {
        service.validate_request()?;
        debug!("Creating service: {}", service.title);

        let result = sqlx::query(
            r#"
            INSERT INTO services (title, description, link, imageUrl)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.link)
        .bind(&service.image_url)
        .execute(self.pool.inner())
        .await?;

        let id = ServiceId::new(result.last_insert_rowid());
        Ok(service.clone().with_id(id))
    }

    async fn update(&self, id: ServiceId, service: &Service) -> HomelabResult<Service> {
        service.validate_request()?;
        debug!("Updating service: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE services
            SET title = ?, description = ?, link = ?, imageUrl = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.link)
        .bind(&service.image_url)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(HomelabError::not_found(SERVICE_RESOURCE, id));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| HomelabError::not_found(SERVICE_RESOURCE, id))
    }

    async fn delete(&self, id: ServiceId) -> HomelabResult<()> {
        debug!("Deleting service: {}", id);

        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(HomelabError::not_found(SERVICE_RESOURCE, id));
        }

        Ok(())
    }
}
