#![cfg(test)]
use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::support::{app, catalog_with, get, send};

#[tokio::test]
async fn quote_crud() {
    let app = app(catalog_with(0).await);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/quotes/",
        Some(json!({"quote": "Be yourself; everyone else is already taken.", "author": "Oscar Wilde"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["signs"], 44);
    assert_eq!(created["book"], "");

    let (status, patched) = send(
        &app,
        Method::PATCH,
        "/api/quotes/1/",
        Some(json!({"book": "Unknown"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["book"], "Unknown");
    assert_eq!(patched["author"], "Oscar Wilde");

    let (status, replaced) = send(&app, Method::PUT, "/api/quotes/1/", Some(json!({"quote": "New"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["author"], "");

    let (status, _) = send(&app, Method::DELETE, "/api/quotes/1/", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&app, "/api/quotes/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found.");
}

#[tokio::test]
async fn quote_validation_errors() {
    let app = app(catalog_with(0).await);

    let (status, body) = send(&app, Method::POST, "/api/quotes/", Some(json!({"quote": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "quote");

    let long_author = "x".repeat(201);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quotes/",
        Some(json!({"quote": "text", "author": long_author})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "author");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quotes/",
        Some(json!({"quote": "text", "type": [42]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "type");

    let (status, _) = send(&app, Method::POST, "/api/quotes/", Some(json!({"author": "Nobody"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn taxonomy_listings_only_show_used_records() {
    let app = app(catalog_with(0).await);

    for name in ["Paradox", "Irony", "Unused"] {
        let (status, _) = send(&app, Method::POST, "/api/types/", Some(json!({"type": name}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (_, love) = send(&app, Method::POST, "/api/topics/", Some(json!({"topic": "Love"}))).await;
    assert_eq!(love, json!({"id": 1, "topic": "Love"}));

    send(&app, Method::POST, "/api/quotes/", Some(json!({"quote": "a", "type": [1], "topics": [1]}))).await;
    send(&app, Method::POST, "/api/quotes/", Some(json!({"quote": "b", "type": [2]}))).await;

    let (_, types) = get(&app, "/api/types/").await;
    assert_eq!(types, json!([{"id": 2, "type": "Irony"}, {"id": 1, "type": "Paradox"}]));

    let (_, narrowed) = get(&app, "/api/types/?topic=1").await;
    assert_eq!(narrowed, json!([{"id": 1, "type": "Paradox"}]));

    let (_, topics) = get(&app, "/api/topics/?type=2").await;
    assert_eq!(topics, json!([]));

    let (status, unused) = get(&app, "/api/types/3/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unused["type"], "Unused");

    let (status, _) = get(&app, "/api/types/?topic=love").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_type_detaches_it() {
    let app = app(catalog_with(0).await);
    send(&app, Method::POST, "/api/types/", Some(json!({"type": "Irony"}))).await;
    send(&app, Method::POST, "/api/quotes/", Some(json!({"quote": "a", "type": [1]}))).await;

    let (status, _) = send(&app, Method::DELETE, "/api/types/1/", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, quote) = get(&app, "/api/quotes/1/").await;
    assert_eq!(quote["type"], json!([]));

    let (status, _) = get(&app, "/api/quotes/?type=1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn filter_parameters_are_validated_without_search() {
    let app = app(catalog_with(3).await);

    let (status, _) = get(&app, "/api/quotes/?type=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/quotes/?type=abc&search=number").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn pages_have_unique_slugs_and_render() {
    let app = app(catalog_with(2).await);
    let about = json!({"title": "About us", "slug": "about", "content": "<script>alert(1)</script>"});

    let (status, _) = send(&app, Method::POST, "/api/pages/", Some(about.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/pages/", Some(about)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "slug");

    let (status, html) = get(&app, "/about").await;
    assert_eq!(status, StatusCode::OK);
    let html = html.as_str().unwrap();
    assert!(html.contains("<h1>About us</h1>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));

    let (_, index) = get(&app, "/").await;
    let index = index.as_str().unwrap();
    assert!(index.contains("2 quotes in the catalog"));
    assert!(index.contains("href=\"/about\""));

    let (status, _) = get(&app, "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn statistics_report() {
    let app = app(catalog_with(0).await);
    send(&app, Method::POST, "/api/types/", Some(json!({"type": "Irony"}))).await;
    send(&app, Method::POST, "/api/quotes/", Some(json!({"quote": "a", "author": "Mark Twain", "type": [1]}))).await;
    send(&app, Method::POST, "/api/quotes/", Some(json!({"quote": "b"}))).await;

    let (status, report) = get(&app, "/api/statistics/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_quotes"], 2);
    assert_eq!(report["type_stats"], json!([{"id": 1, "name": "Irony", "quote_count": 1}]));
    assert_eq!(report["quotes_without_types"], 1);
    assert_eq!(report["quotes_without_topics"], 2);
    assert_eq!(
        report["author_stats"],
        json!([{"full_name": "Mark Twain", "surname": "Twain", "quote_count": 1}])
    );
    assert_eq!(report["quotes_without_authors"], 1);
}

#[tokio::test]
async fn api_root_lists_collections() {
    let app = app(catalog_with(0).await);
    let (status, root) = get(&app, "/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["quotes"], "/api/quotes/");
}
