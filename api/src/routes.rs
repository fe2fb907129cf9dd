//! JSON routes, all under `/api/`. Every route ends with a slash.

use axum::Json;
use axum::Router;
use axum::routing::get;
use serde_json::{Value, json};

use crate::AppState;

pub mod quotes;
pub mod records;
pub mod statistics;
pub mod taxonomy;

pub fn api() -> Router<AppState> {
    Router::new()
        .route("/api/", get(root))
        .merge(quotes::routes())
        .merge(records::page_routes())
        .merge(taxonomy::routes())
        .route("/api/statistics/", get(statistics::report))
}

async fn root() -> Json<Value> {
    Json(json!({
        "quotes": "/api/quotes/",
        "pages": "/api/pages/",
        "types": "/api/types/",
        "topics": "/api/topics/",
        "statistics": "/api/statistics/",
    }))
}
