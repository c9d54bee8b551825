//! Services catalog controller.

use crate::{
    extractors::JsonBody,
    middleware::{invalidate_on_success, read_through, CacheLayer},
    responses::{created, ok, ApiResult, AppError, MessageResponse},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Json, Router,
};
use homelab_core::{HomelabError, ServiceDto, ServiceId};
use homelab_service::cache_keys::{services_pattern, SERVICES_PREFIX};
use tracing::debug;

/// Mount point of the services API.
pub const BASE_PATH: &str = "/api/services";

/// Creates the services router.
///
/// GET routes read through the cache; mutations invalidate every cached
/// service response once they succeed. The collection also answers with a
/// trailing slash.
pub fn router(cache: &CacheLayer) -> Router<AppState> {
    let list_cache = from_fn_with_state(cache.cache(SERVICES_PREFIX, None, None), read_through);
    let item_cache = from_fn_with_state(
        cache.cache(SERVICES_PREFIX, Some(CacheLayer::by_id()), None),
        read_through,
    );
    let invalidate =
        from_fn_with_state(cache.invalidate(&services_pattern()), invalidate_on_success);

    let collection = get(list_services)
        .route_layer(list_cache)
        .merge(post(create_service).route_layer(invalidate.clone()));
    let item = get(get_service).route_layer(item_cache).merge(
        put(update_service)
            .merge(delete(delete_service))
            .route_layer(invalidate),
    );

    Router::new()
        .route(BASE_PATH, collection.clone())
        .route(&format!("{BASE_PATH}/"), collection)
        .route(&format!("{BASE_PATH}/:id"), item)
}

/// List all services.
async fn list_services(State(state): State<AppState>) -> ApiResult<Vec<ServiceDto>> {
    debug!("List services request");

    let services = state.use_cases.get_all_services().await?;
    ok(services)
}

/// Get a service by id.
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ServiceDto> {
    debug!("Get service request: {}", id);

    let service_id = parse_service_id(&id)?;
    let service = state
        .use_cases
        .get_service_by_id(service_id)
        .await?
        .ok_or_else(|| HomelabError::not_found("Service", service_id))?;

    ok(service)
}

/// Create a service.
async fn create_service(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<ServiceDto>,
) -> Result<(StatusCode, Json<ServiceDto>), AppError> {
    debug!("Create service request: {}", dto.title);

    let service = state.use_cases.create_service(dto).await?;
    Ok(created(service))
}

/// Replace a service.
async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(dto): JsonBody<ServiceDto>,
) -> ApiResult<ServiceDto> {
    debug!("Update service request: {}", id);

    let service_id = parse_service_id(&id)?;
    let service = state.use_cases.update_service(service_id, dto).await?;
    ok(service)
}

/// Delete a service.
async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    debug!("Delete service request: {}", id);

    let service_id = parse_service_id(&id)?;
    state.use_cases.delete_service(service_id).await?;
    ok(MessageResponse::new("Service deleted"))
}

fn parse_service_id(raw: &str) -> Result<ServiceId, AppError> {
    ServiceId::parse(raw)
        .map_err(|_| AppError(HomelabError::validation(format!("Invalid service id: {}", raw))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_id() {
        assert_eq!(parse_service_id("7").unwrap(), ServiceId::new(7));
        let err = parse_service_id("seven").unwrap_err();
        assert_eq!(err.0.status_code(), 400);
    }
}
