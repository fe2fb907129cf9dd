//! `/api/types/` and `/api/topics/`.
//!
//! The listings only show classifications some quote actually carries and can
//! be narrowed by the other classification.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use quotes_common::models::taxonomy::{QuoteType, Topic};
use quotes_core::query::parse_id;
use serde::Deserialize;

use super::records::{create, destroy, partial_update, retrieve, update};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
struct NarrowBy {
    topic: Option<String>,
    #[serde(rename = "type")]
    type_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/types/", get(list_types).post(create::<QuoteType>))
        .route(
            "/api/types/{id}/",
            get(retrieve::<QuoteType>)
                .put(update::<QuoteType>)
                .patch(partial_update::<QuoteType>)
                .delete(destroy::<QuoteType>),
        )
        .route("/api/topics/", get(list_topics).post(create::<Topic>))
        .route(
            "/api/topics/{id}/",
            get(retrieve::<Topic>)
                .put(update::<Topic>)
                .patch(partial_update::<Topic>)
                .delete(destroy::<Topic>),
        )
}

fn narrowing(name: &'static str, raw: Option<&str>) -> Result<Option<u64>, ApiError> {
    match raw.filter(|v| !v.is_empty()) {
        Some(value) => Ok(Some(parse_id(name, value)?)),
        None => Ok(None),
    }
}

async fn list_types(
    State(state): State<AppState>,
    Query(params): Query<NarrowBy>,
) -> Result<Json<Vec<QuoteType>>, ApiError> {
    let topic = narrowing("topic", params.topic.as_deref())?;
    Ok(Json(state.catalog.types_in_use(topic).await?))
}

async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<NarrowBy>,
) -> Result<Json<Vec<Topic>>, ApiError> {
    let type_id = narrowing("type", params.type_id.as_deref())?;
    Ok(Json(state.catalog.topics_in_use(type_id).await?))
}
