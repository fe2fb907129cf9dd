use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use quotes_api::{AppState, router};
use quotes_common::config::Config;
use quotes_common::models::quote::{Quote, QuoteDraft};
use quotes_core::catalog::CatalogService;
use quotes_core::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Quote texts all have the same length, so the default order is id order.
pub fn draft(i: usize) -> QuoteDraft {
    QuoteDraft {
        quote: format!("Quote number {i:04}"),
        author: format!("Author {}", i % 7),
        ..QuoteDraft::default()
    }
}

pub async fn catalog_with(n: usize) -> CatalogService {
    let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
    let drafts: Vec<QuoteDraft> = (1..=n).map(draft).collect();
    catalog.create_many::<Quote>(drafts).await.unwrap();
    catalog
}

pub fn app(catalog: CatalogService) -> Router {
    router(AppState::new(catalog, Config::default()))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub fn ids(envelope: &Value) -> Vec<u64> {
    envelope["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_u64().unwrap())
        .collect()
}
