//! Generic CRUD handlers for records served as they are stored.
//!
//! Pages use the whole set; types and topics reuse the single-record
//! handlers and bring their own listing (see [`taxonomy`](super::taxonomy)).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use quotes_common::models::page::Page;
use quotes_core::catalog::Catalogued;
use serde_json::Value;

use crate::error::{ApiError, decode};
use crate::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/api/pages/", get(list::<Page>).post(create::<Page>))
        .route(
            "/api/pages/{id}/",
            get(retrieve::<Page>)
                .put(update::<Page>)
                .patch(partial_update::<Page>)
                .delete(destroy::<Page>),
        )
}

pub async fn list<T: Catalogued>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(state.catalog.list::<T>().await?))
}

pub async fn retrieve<T: Catalogued>(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(state.catalog.get::<T>(id).await?))
}

pub async fn create<T: Catalogued>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let draft: T::Draft = decode(body)?;
    let record = state.catalog.create::<T>(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<T: Catalogued>(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<T>, ApiError> {
    let draft: T::Draft = decode(body)?;
    Ok(Json(state.catalog.update::<T>(id, draft).await?))
}

pub async fn partial_update<T: Catalogued>(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(state.catalog.patch::<T>(id, body).await?))
}

pub async fn destroy<T: Catalogued>(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete::<T>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
