//! # Domain Models
//!
//! The entities of the quotes catalog.
//!
//! ## Core Entities
//! * [`quote::Quote`]: a quote with its author, book and classification.
//! * [`page::Page`]: a static content page addressed by slug.
//! * [`taxonomy::QuoteType`] and [`taxonomy::Topic`]: the two classifications
//!   a quote can carry.
//!
//! Every entity implements [`Record`], which is all the storage layer needs
//! to know about it.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub mod page;
pub mod quote;
pub mod taxonomy;

/// Longest value accepted by the short text fields (author, title, slug...).
pub const MAX_CHAR_FIELD: usize = 200;

/// A stored entity with a stable integer identifier.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The client-supplied part of the record, i.e. everything except `id`.
    type Draft: Validate + Clone + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Human readable entity name used in errors and logs.
    const NAME: &'static str;

    fn id(&self) -> u64;

    fn from_draft(id: u64, draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;

    /// Value that must be unique across the table, if any.
    fn unique_key(&self) -> Option<(&'static str, &str)> {
        None
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field is required and must not be blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(crate::CatalogError::validation(field, "This field may not be blank."));
    }
    Ok(())
}

pub(crate) fn max_chars(field: &'static str, value: &str, limit: usize) -> Result<()> {
    if value.chars().count() > limit {
        return Err(crate::CatalogError::validation(
            field,
            format!("Ensure this field has no more than {limit} characters."),
        ));
    }
    Ok(())
}
