//! End-to-end tests over the fully wired application.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use homelab_config::ServerConfig;
use homelab_repository::{DatabasePool, InMemoryServiceRepository};
use homelab_server::AppContainer;
use homelab_service::{CacheInterface, InMemoryCacheService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn exercise_crud(app: &Router) {
    let payload = json!({
        "title": "Jellyfin",
        "description": "Media server",
        "link": "http://jellyfin.lan",
        "imageUrl": "jellyfin.png"
    });

    let response = send(app, Method::POST, "/api/services", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["imageUrl"], "jellyfin.png");

    let response = send(app, Method::GET, "/api/services", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "MISS");
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = send(app, Method::GET, "/api/services", None).await;
    assert_eq!(response.headers()["x-cache"], "HIT");

    let item_uri = format!("/api/services/{}", id);
    let response = send(app, Method::GET, &item_uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Jellyfin");

    let response = send(app, Method::GET, "/api/services/999999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let update = json!({"title": "Jellyfin", "description": "Movies", "link": "http://jf.lan"});
    let response = send(app, Method::PUT, &item_uri, Some(update)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(app, Method::GET, &item_uri, None).await;
    assert_eq!(response.headers()["x-cache"], "MISS");
    assert_eq!(body_json(response).await["description"], "Movies");

    let response = send(app, Method::DELETE, &item_uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(app, Method::GET, &item_uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(app, Method::GET, "/api/services", None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_crud_lifecycle_over_sqlite() {
    let container = AppContainer::in_memory().await.unwrap();
    exercise_crud(&container.router()).await;
    container.close().await;
}

#[tokio::test]
async fn test_crud_lifecycle_over_in_memory_repository() {
    let database = Arc::new(DatabasePool::in_memory().await.unwrap());
    let cache: Arc<dyn CacheInterface> =
        Arc::new(InMemoryCacheService::new(Duration::from_secs(60)));
    let container = AppContainer::from_parts(
        ServerConfig::default(),
        database,
        Arc::new(InMemoryServiceRepository::new()),
        cache,
    )
    .await;

    exercise_crud(&container.router()).await;
}

#[tokio::test]
async fn test_uncached_application_still_serves() {
    let database = Arc::new(DatabasePool::in_memory().await.unwrap());
    let cache: Arc<dyn CacheInterface> =
        Arc::new(InMemoryCacheService::disabled(Duration::from_secs(60)));
    let container = AppContainer::from_parts(
        ServerConfig::default(),
        database,
        Arc::new(InMemoryServiceRepository::new()),
        cache,
    )
    .await;
    let app = container.router();

    let response = send(&app, Method::GET, "/api/services", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-cache").is_none());

    let response = send(&app, Method::GET, "/api/status", None).await;
    let status = body_json(response).await;
    assert_eq!(status["cache"]["enabled"], false);
    assert_eq!(status["cache"]["connected"], false);
    assert_eq!(status["database"]["connected"], true);
}

#[tokio::test]
async fn test_null_fields_are_validation_errors() {
    let container = AppContainer::in_memory().await.unwrap();
    let app = container.router();

    let body = json!({"title": null, "description": "Media", "link": "http://jf.lan"});
    let response = send(&app, Method::POST, "/api/services", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("title is required"));

    let response = send(&app, Method::GET, "/api/services", None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_closed_database_is_not_ready() {
    let container = AppContainer::in_memory().await.unwrap();
    let app = container.router();

    let response = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    container.database().close().await;
    let response = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
