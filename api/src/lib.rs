//! # Quotes API
//!
//! The HTTP adapter of the catalog: the JSON API under `/api/` and the two
//! server-rendered pages.
//!
//! * **[`routes`]**: JSON handlers, one submodule per resource.
//! * **[`site`]**: HTML rendering with `maud`.
//! * **[`server`]**: binds the listener and serves the router.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use quotes_common::config::Config;
use quotes_core::catalog::CatalogService;
use quotes_core::listing::ListingService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod server;
pub mod site;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub listing: ListingService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: CatalogService, config: Config) -> Self {
        Self {
            listing: catalog.listing(),
            catalog,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::api())
        .route("/", get(site::index))
        .route("/{slug}", get(site::page))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
