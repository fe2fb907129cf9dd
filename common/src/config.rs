use std::path::PathBuf;

use crate::error::CatalogError;

/// Items per page when the client does not ask for another size.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Largest `page_size` a client may request.
pub const MAX_PAGE_SIZE: usize = 199;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// JSON snapshot backing the record store.
    ///
    /// When absent the catalog lives in memory only and is lost on exit.
    pub data_file: Option<PathBuf>,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    /// Cap applied to `page_size` overrides.
    pub max_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
            data_file: None,
            pagination: PaginationConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.pagination.validate()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(CatalogError::InvalidPageSize);
        }
        if self.default_page_size > self.max_page_size {
            return Err(CatalogError::Validation {
                field: "page_size",
                message: format!(
                    "default page size {} exceeds the maximum of {}",
                    self.default_page_size, self.max_page_size
                ),
            });
        }
        Ok(())
    }

    /// Resolves a raw `page_size` override.
    ///
    /// Anything that is not a positive integer falls back to the default;
    /// larger values are capped at `max_page_size`.
    pub fn effective_page_size(&self, requested: Option<&str>) -> usize {
        requested
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .map_or(self.default_page_size, |size| size.min(self.max_page_size))
    }
}
