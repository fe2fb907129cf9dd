//! Shared building blocks for the quotes catalog: models, configuration and errors.

pub mod config;
pub mod error;
pub mod models;

pub use error::{CatalogError, Result};
