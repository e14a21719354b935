use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use datepoll_events::routes::routes;
use datepoll_events::{EventCache, EventService, InMemoryEventStore, LastError};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const BASE: &str = "https://poll.example/";

/// Router over a fresh in-memory store, mounted under `/api` like the backend.
pub fn app() -> Router {
    let service = EventService::new(
        Arc::new(InMemoryEventStore::new()),
        Arc::new(EventCache::new()),
        Arc::new(LastError::new()),
        BASE,
    );
    Router::new().nest("/api", routes(Arc::new(service)))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
