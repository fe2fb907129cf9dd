//! Error types shared by every layer of the catalog.

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No record with this id exists.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Lookup by a non-id key (e.g. a page slug) failed.
    #[error("{entity} '{key}' not found")]
    KeyNotFound { entity: &'static str, key: String },

    /// A query parameter could not be parsed.
    #[error("Invalid {name} parameter")]
    InvalidParameter { name: &'static str, value: String },

    /// A `position` outside `1..=total_count` was requested.
    #[error("Position out of range")]
    PositionOutOfRange { total_count: usize },

    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// A field failed validation on write.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A unique field collided with an existing record.
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn invalid_parameter(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
