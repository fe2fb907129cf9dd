//! Server-rendered HTML: the index and the content pages addressed by slug.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, Markup, html};
use quotes_common::CatalogError;
use quotes_common::models::page::Page;
use quotes_core::query::QuoteFilter;

use crate::error::ApiError;
use crate::AppState;

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Quotes" }
            }
            body {
                header { a href="/" { "Quotes" } }
                main { (body) }
            }
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Markup, ApiError> {
    let total = state.listing.total_count(&QuoteFilter::all()).await?;
    let pages = state.catalog.list::<Page>().await?;

    Ok(layout(
        "Home",
        html! {
            h1 { "Quotes" }
            p { (total) " quotes in the catalog. Browse them at " a href="/api/quotes/" { "/api/quotes/" } "." }
            @if !pages.is_empty() {
                ul {
                    @for page in &pages {
                        li { a href={ "/" (page.slug) } { (page.title) } }
                    }
                }
            }
        },
    ))
}

pub async fn page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.catalog.page_by_slug(&slug).await {
        Ok(page) => layout(
            &page.title,
            html! {
                article {
                    h1 { (page.title) }
                    (page.content)
                }
            },
        )
        .into_response(),
        Err(CatalogError::KeyNotFound { .. }) => (
            StatusCode::NOT_FOUND,
            layout("Not found", html! { h1 { "Page not found" } }),
        )
            .into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}
