//! Service entity.

use crate::validation::rules::not_blank;
use crate::ServiceId;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Wire representation of a service.
///
/// Every field is optional on input so a partial body still deserializes;
/// missing text fields surface as validation errors at write time instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    #[serde(default)]
    pub id: Option<ServiceId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Reads an explicit `null` the same way as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A service shown on the homelab dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Service {
    /// Store-assigned identifier, `None` until the service is persisted.
    pub id: Option<ServiceId>,

    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Target URL of the service.
    #[validate(length(min = 1, message = "link is required"))]
    pub link: String,

    pub image_url: Option<String>,
}

impl Service {
    /// Creates a service that has not been persisted yet.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            link: link.into(),
            image_url,
        }
    }

    /// Builds an entity from a DTO. No validation is performed here.
    #[must_use]
    pub fn from_dto(dto: ServiceDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            link: dto.link,
            image_url: dto.image_url,
        }
    }

    /// Returns the wire representation of this service.
    #[must_use]
    pub fn to_dto(&self) -> ServiceDto {
        ServiceDto {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            link: self.link.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Returns the same service with its identifier replaced.
    #[must_use]
    pub fn with_id(mut self, id: ServiceId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<Service> for ServiceDto {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            title: service.title,
            description: service.description,
            link: service.link,
            image_url: service.image_url,
        }
    }
}
