//! `/api/quotes/`: the paginated listing and quote CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use quotes_common::models::quote::{Quote, QuoteDraft, QuoteResource};
use quotes_core::listing::Listing;
use quotes_core::pagination::PagesInfo;
use quotes_core::query::{ListQuery, RawListParams};
use serde_json::{Value, json};

use crate::error::{ApiError, decode};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/quotes/", get(list).post(create))
        .route("/api/quotes/pages_info/", get(pages_info))
        .route("/api/quotes/total_count/", get(total_count))
        .route(
            "/api/quotes/{id}/",
            get(retrieve).put(update).patch(partial_update).delete(destroy),
        )
}

/// A page envelope, or a single quote when `position` was given.
async fn list(
    State(state): State<AppState>,
    Query(params): Query<RawListParams>,
) -> Result<Response, ApiError> {
    let query = ListQuery::parse(&params, &state.config.pagination)?;
    let response = match state.listing.list(&query).await? {
        Listing::Page(page) => Json(page).into_response(),
        Listing::Single(quote) => Json(quote).into_response(),
    };
    Ok(response)
}

async fn pages_info(
    State(state): State<AppState>,
    Query(params): Query<RawListParams>,
) -> Result<Json<PagesInfo>, ApiError> {
    let query = ListQuery::parse(&params, &state.config.pagination)?;
    Ok(Json(state.listing.pages_info(&query).await?))
}

async fn total_count(
    State(state): State<AppState>,
    Query(params): Query<RawListParams>,
) -> Result<Json<Value>, ApiError> {
    let query = ListQuery::parse(&params, &state.config.pagination)?;
    let total = state.listing.total_count(&query.filter).await?;
    Ok(Json(json!({ "total_count": total })))
}

async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<QuoteResource>, ApiError> {
    let quote: Quote = state.catalog.get(id).await?;
    Ok(Json(quote.into()))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<QuoteResource>), ApiError> {
    let draft: QuoteDraft = decode(body)?;
    let quote: Quote = state.catalog.create(draft).await?;
    Ok((StatusCode::CREATED, Json(quote.into())))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<QuoteResource>, ApiError> {
    let draft: QuoteDraft = decode(body)?;
    let quote: Quote = state.catalog.update(id, draft).await?;
    Ok(Json(quote.into()))
}

async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<QuoteResource>, ApiError> {
    let quote: Quote = state.catalog.patch(id, body).await?;
    Ok(Json(quote.into()))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode, ApiError> {
    state.catalog.delete::<Quote>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
