//! # Record Store (Outbound Port)
//!
//! The contracts the services need from storage. Services only ever see these
//! traits; the concrete backend lives in [`memory`].
//!
//! ## Rules
//! 1. Everything here is a trait, implementations live in submodules.
//! 2. Methods speak in domain models ([`Record`] types, [`QuoteFilter`]).
//! 3. Stores never validate drafts; that is the caller's job.

use async_trait::async_trait;
use quotes_common::Result;
use quotes_common::models::Record;
use quotes_common::models::quote::Quote;

use crate::query::{QuoteFilter, SortOrder};

pub mod memory;

pub use memory::MemoryStore;

/// Plain CRUD over one table.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Every record, ordered by id.
    async fn all(&self) -> Result<Vec<T>>;

    async fn get(&self, id: u64) -> Result<Option<T>>;

    /// Stores `draft` under a freshly assigned id.
    async fn insert(&self, draft: T::Draft) -> Result<T>;

    /// Stores every draft in order, as one write where the backend allows it.
    async fn insert_many(&self, drafts: Vec<T::Draft>) -> Result<Vec<T>> {
        let mut records = Vec::with_capacity(drafts.len());
        for draft in drafts {
            records.push(self.insert(draft).await?);
        }
        Ok(records)
    }

    /// Replaces the record, `Ok(None)` when `id` does not exist.
    async fn replace(&self, id: u64, draft: T::Draft) -> Result<Option<T>>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: u64) -> Result<bool>;

    /// Drops every record. The id sequence keeps counting.
    async fn clear(&self) -> Result<()>;
}

/// Read access shaped for pagination, plus the maintenance operations that
/// need to touch quote ids.
#[async_trait]
pub trait QuoteStore: Repository<Quote> {
    async fn count(&self, filter: &QuoteFilter) -> Result<usize>;

    /// Up to `limit` matching quotes starting at `offset` in `order`.
    async fn slice(
        &self,
        filter: &QuoteFilter,
        order: SortOrder,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Quote>>;

    /// Id of the quote at `offset`, used for page labels.
    async fn id_at(&self, filter: &QuoteFilter, order: SortOrder, offset: usize) -> Result<Option<u64>> {
        let quotes = self.slice(filter, order, offset, 1).await?;
        Ok(quotes.first().map(Record::id))
    }

    /// Renumbers quotes `1..=n` in id order and restarts the id sequence.
    ///
    /// Returns the number of quotes renumbered.
    async fn reindex(&self) -> Result<usize>;
}
