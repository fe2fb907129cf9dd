#![cfg(test)]
use axum::http::StatusCode;
use serde_json::json;

use crate::support::{app, catalog_with, get, ids};

#[tokio::test]
async fn ascending_listing_merges_the_tail() {
    let app = app(catalog_with(250).await);

    let (status, first) = get(&app, "/api/quotes/?ordering=id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["count"], 250);
    assert_eq!(first["total_pages"], 2);
    assert_eq!(first["items_on_page"], 100);
    assert_eq!(first["page_label"], "1 - 100");
    assert_eq!(ids(&first), (1..=100).collect::<Vec<_>>());

    let (_, second) = get(&app, "/api/quotes/?ordering=id&page=2").await;
    assert_eq!(second["current_page"], 2);
    assert_eq!(second["items_on_page"], 150);
    assert_eq!(second["start_item"], 101);
    assert_eq!(second["end_item"], 250);
    assert_eq!(second["page_label"], "101 - 250");
    assert_eq!(second["next"], json!(null));
    assert_eq!(second["previous"], json!(null));
}

#[tokio::test]
async fn descending_listing_merges_the_head() {
    let app = app(catalog_with(250).await);

    let (_, first) = get(&app, "/api/quotes/?ordering=-id&page=1").await;
    assert_eq!(first["items_on_page"], 150);
    assert_eq!(first["start_item"], 1);
    assert_eq!(first["end_item"], 150);
    assert_eq!(first["page_label"], "101 - 250");
    assert_eq!(ids(&first).first(), Some(&250));
    assert_eq!(ids(&first).last(), Some(&101));

    let (_, second) = get(&app, "/api/quotes/?ordering=-id&page=2").await;
    assert_eq!(second["items_on_page"], 100);
    assert_eq!(second["start_item"], 151);
    assert_eq!(second["end_item"], 250);
    assert_eq!(second["page_label"], "1 - 100");
}

#[tokio::test]
async fn default_order_is_by_length() {
    let catalog = catalog_with(3).await;
    catalog
        .create::<quotes_common::models::quote::Quote>(quotes_common::models::quote::QuoteDraft {
            quote: "Short".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let app = app(catalog);

    let (_, page) = get(&app, "/api/quotes/").await;
    assert_eq!(ids(&page), vec![4, 1, 2, 3]);
    assert_eq!(page["results"][0]["signs"], 5);
    assert_eq!(page["results"][0]["font_size"], "max");
}

#[tokio::test]
async fn page_overflow_is_an_empty_page() {
    let app = app(catalog_with(250).await);

    for uri in [
        "/api/quotes/?page=3",
        "/api/quotes/?ordering=-id&page=9",
        "/api/quotes/?page=99999999999999999999",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["count"], 250);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["items_on_page"], 0);
        assert_eq!(body["results"], json!([]));
    }
}

#[tokio::test]
async fn malformed_page_is_rejected() {
    let app = app(catalog_with(5).await);
    let (status, body) = get(&app, "/api/quotes/?page=two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn page_size_override_is_capped() {
    let app = app(catalog_with(250).await);

    let (_, small) = get(&app, "/api/quotes/?page_size=50").await;
    assert_eq!(small["total_pages"], 5);
    assert_eq!(small["page_size"], 50);

    let (_, capped) = get(&app, "/api/quotes/?page_size=1000").await;
    assert_eq!(capped["page_size"], 199);
    assert_eq!(capped["total_pages"], 1);
    assert_eq!(capped["items_on_page"], 250);

    let (_, fallback) = get(&app, "/api/quotes/?page_size=abc").await;
    assert_eq!(fallback["page_size"], 100);
}

#[tokio::test]
async fn position_returns_a_single_quote() {
    let app = app(catalog_with(250).await);

    let (status, quote) = get(&app, "/api/quotes/?position=1&ordering=-id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["id"], 250);
    assert!(quote.get("results").is_none());

    let (_, quote) = get(&app, "/api/quotes/?position=250&page=7").await;
    assert_eq!(quote["id"], 250);
}

#[tokio::test]
async fn position_out_of_range() {
    let app = app(catalog_with(250).await);

    for position in ["251", "0", "-1", "99999999999999999999"] {
        let (status, body) = get(&app, &format!("/api/quotes/?position={position}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "position {position}");
        assert_eq!(body, json!({"error": "Position out of range", "total_count": 250}));
    }

    let (status, _) = get(&app, "/api/quotes/?position=first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_disables_pagination() {
    let app = app(catalog_with(250).await);

    let (status, body) = get(&app, "/api/quotes/?search=author%203&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["count"], 36);
    assert_eq!(body["items_on_page"], 36);
    assert_eq!(body["page_label"], "1 - 36");

    let (status, body) = get(&app, "/api/quotes/?search=%20%20&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["count"], 250);
    assert_eq!(body["items_on_page"], 250);
}

#[tokio::test]
async fn search_needs_a_word_boundary() {
    let catalog = catalog_with(0).await;
    for text in ["«Freedom» is a word", "Unfreedom is another", "freedom first"] {
        catalog
            .create::<quotes_common::models::quote::Quote>(quotes_common::models::quote::QuoteDraft {
                quote: text.into(),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    let app = app(catalog);

    let (_, body) = get(&app, "/api/quotes/?search=FREEDOM&ordering=id").await;
    assert_eq!(ids(&body), vec![1, 3]);
}

#[tokio::test]
async fn pages_info_describes_merged_pages() {
    let app = app(catalog_with(250).await);

    let (status, info) = get(&app, "/api/quotes/pages_info/?ordering=id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        info,
        json!({
            "total_count": 250,
            "total_pages": 2,
            "page_size": 100,
            "pages": [
                {"page": 1, "start_item": 1, "end_item": 100, "items_count": 100, "label": "1 - 100"},
                {"page": 2, "start_item": 101, "end_item": 250, "items_count": 150, "label": "101 - 250"},
            ],
            "pagination_disabled": false,
        })
    );

    let (_, disabled) = get(&app, "/api/quotes/pages_info/?search=number").await;
    assert_eq!(
        disabled,
        json!({
            "total_count": 250,
            "total_pages": 0,
            "page_size": 0,
            "pages": [],
            "pagination_disabled": true,
        })
    );
}

#[tokio::test]
async fn total_count_applies_filters() {
    let app = app(catalog_with(20).await);

    let (_, all) = get(&app, "/api/quotes/total_count/").await;
    assert_eq!(all, json!({"total_count": 20}));

    let (_, some) = get(&app, "/api/quotes/total_count/?search=0001").await;
    assert_eq!(some, json!({"total_count": 1}));
}
