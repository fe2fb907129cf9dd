//! In-memory record store with an optional JSON snapshot on disk.
//!
//! All tables sit behind one [`RwLock`]: readers run concurrently, writers
//! are serialized. When the store was opened from a file, every mutation
//! rewrites the snapshot before the write lock is released.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quotes_common::models::Record;
use quotes_common::models::page::Page;
use quotes_common::models::quote::Quote;
use quotes_common::models::taxonomy::{QuoteType, Topic};
use quotes_common::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{QuoteStore, Repository};
use crate::query::{QuoteFilter, SortOrder};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Record")]
struct Table<T> {
    /// Next id to hand out. Never decreases, so deleted ids are not reused.
    next_id: u64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T: Record> Table<T> {
    /// Restores the invariants a hand-edited snapshot may have broken.
    fn normalize(&mut self) {
        self.rows.sort_by_key(T::id);
        self.rows.dedup_by_key(|row| row.id());
        let max_id = self.rows.last().map_or(0, T::id);
        self.next_id = self.next_id.max(max_id + 1).max(1);
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.rows.binary_search_by_key(&id, T::id).ok()
    }

    fn get(&self, id: u64) -> Option<&T> {
        self.position(id).map(|idx| &self.rows[idx])
    }

    fn ensure_unique(&self, candidate: &T) -> Result<()> {
        let Some((field, value)) = candidate.unique_key() else {
            return Ok(());
        };

        let taken = self.rows.iter().any(|row| {
            row.id() != candidate.id() && row.unique_key().is_some_and(|(_, v)| v == value)
        });

        if taken {
            return Err(CatalogError::Conflict {
                entity: T::NAME,
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, draft: T::Draft) -> Result<T> {
        let record = T::from_draft(self.next_id, draft);
        self.ensure_unique(&record)?;
        self.next_id += 1;
        self.rows.push(record.clone());
        Ok(record)
    }

    fn replace(&mut self, id: u64, draft: T::Draft) -> Result<Option<T>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };
        let record = T::from_draft(id, draft);
        self.ensure_unique(&record)?;
        self.rows[idx] = record.clone();
        Ok(Some(record))
    }

    fn remove(&mut self, id: u64) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.rows.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    #[serde(default)]
    quotes: Table<Quote>,
    #[serde(default)]
    pages: Table<Page>,
    #[serde(default)]
    types: Table<QuoteType>,
    #[serde(default)]
    topics: Table<Topic>,
}

impl Tables {
    fn normalize(&mut self) {
        self.quotes.normalize();
        self.pages.normalize();
        self.types.normalize();
        self.topics.normalize();
    }

    fn matching(&self, filter: &QuoteFilter, order: SortOrder) -> Vec<&Quote> {
        let mut quotes: Vec<&Quote> = self.quotes.rows.iter().filter(|q| filter.matches(q)).collect();
        match order {
            SortOrder::Length => quotes.sort_by_key(|q| (q.signs(), q.id)),
            SortOrder::IdAscending => {}
            SortOrder::IdDescending => quotes.reverse(),
        }
        quotes
    }
}

/// Maps a record type to its table.
trait Stored: Record {
    fn table(tables: &Tables) -> &Table<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Runs after a record was removed, to drop references to it.
    fn on_removed(_tables: &mut Tables, _id: u64) {}
}

impl Stored for Quote {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.quotes
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.quotes
    }
}

impl Stored for Page {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.pages
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.pages
    }
}

impl Stored for QuoteType {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.types
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.types
    }

    fn on_removed(tables: &mut Tables, id: u64) {
        for quote in &mut tables.quotes.rows {
            quote.types.retain(|type_id| *type_id != id);
        }
    }
}

impl Stored for Topic {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.topics
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.topics
    }

    fn on_removed(tables: &mut Tables, id: u64) {
        for quote in &mut tables.quotes.rows {
            quote.topics.retain(|topic_id| *topic_id != id);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// A store that lives only as long as the process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the snapshot at `path`, starting empty when the file does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut tables = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Tables>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No data file at {}, starting with an empty catalog", path.display());
                Tables::default()
            }
            Err(e) => return Err(e.into()),
        };
        tables.normalize();

        info!(
            "Loaded {} quotes, {} pages, {} types, {} topics from {}",
            tables.quotes.rows.len(),
            tables.pages.rows.len(),
            tables.types.rows.len(),
            tables.topics.rows.len(),
            path.display()
        );

        Ok(Self {
            tables: RwLock::new(tables),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, tables: &Tables) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(tables)?;
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!("Snapshot written to {}", path.display());
        Ok(())
    }
}

impl MemoryStore {
    async fn all_rows<T: Stored>(&self) -> Result<Vec<T>> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).rows.clone())
    }

    async fn get_row<T: Stored>(&self, id: u64) -> Result<Option<T>> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).get(id).cloned())
    }

    /// Applies `change` to a copy of `tables` and swaps the copy in once the
    /// snapshot is written. On any error the live tables are left untouched.
    async fn commit<R: Send>(
        &self,
        tables: &mut Tables,
        change: impl FnOnce(&mut Tables) -> Result<R> + Send,
    ) -> Result<R> {
        let mut staged = tables.clone();
        let outcome = change(&mut staged)?;
        self.persist(&staged).await?;
        *tables = staged;
        Ok(outcome)
    }

    async fn insert_row<T: Stored>(&self, draft: T::Draft) -> Result<T> {
        let mut tables = self.tables.write().await;
        let record = self
            .commit(&mut tables, |staged| T::table_mut(staged).insert(draft))
            .await?;
        debug!("{} {} created", T::NAME, record.id());
        Ok(record)
    }

    /// All drafts land or none do.
    async fn insert_rows<T: Stored>(&self, drafts: Vec<T::Draft>) -> Result<Vec<T>> {
        let mut tables = self.tables.write().await;
        let records = self
            .commit(&mut tables, |staged| {
                let table = T::table_mut(staged);
                drafts
                    .into_iter()
                    .map(|draft| table.insert(draft))
                    .collect::<Result<Vec<T>>>()
            })
            .await?;
        debug!("{} {} records created", records.len(), T::NAME);
        Ok(records)
    }

    async fn replace_row<T: Stored>(&self, id: u64, draft: T::Draft) -> Result<Option<T>> {
        let mut tables = self.tables.write().await;
        if T::table(&tables).get(id).is_none() {
            return Ok(None);
        }
        let record = self
            .commit(&mut tables, |staged| T::table_mut(staged).replace(id, draft))
            .await?;
        debug!("{} {} updated", T::NAME, id);
        Ok(record)
    }

    async fn remove_row<T: Stored>(&self, id: u64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if T::table(&tables).get(id).is_none() {
            return Ok(false);
        }
        self.commit(&mut tables, |staged| {
            T::table_mut(staged).remove(id);
            T::on_removed(staged, id);
            Ok(())
        })
        .await?;
        debug!("{} {} deleted", T::NAME, id);
        Ok(true)
    }

    async fn clear_rows<T: Stored>(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        self.commit(&mut tables, |staged| {
            let rows = &mut T::table_mut(staged).rows;
            let removed: Vec<u64> = rows.iter().map(T::id).collect();
            rows.clear();
            for id in removed {
                T::on_removed(staged, id);
            }
            Ok(())
        })
        .await
    }
}

macro_rules! repository {
    ($record:ty) => {
        #[async_trait]
        impl Repository<$record> for MemoryStore {
            async fn all(&self) -> Result<Vec<$record>> {
                self.all_rows().await
            }

            async fn get(&self, id: u64) -> Result<Option<$record>> {
                self.get_row(id).await
            }

            async fn insert(&self, draft: <$record as Record>::Draft) -> Result<$record> {
                self.insert_row(draft).await
            }

            async fn insert_many(
                &self,
                drafts: Vec<<$record as Record>::Draft>,
            ) -> Result<Vec<$record>> {
                self.insert_rows(drafts).await
            }

            async fn replace(
                &self,
                id: u64,
                draft: <$record as Record>::Draft,
            ) -> Result<Option<$record>> {
                self.replace_row(id, draft).await
            }

            async fn remove(&self, id: u64) -> Result<bool> {
                self.remove_row::<$record>(id).await
            }

            async fn clear(&self) -> Result<()> {
                self.clear_rows::<$record>().await
            }
        }
    };
}

repository!(Quote);
repository!(Page);
repository!(QuoteType);
repository!(Topic);

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn count(&self, filter: &QuoteFilter) -> Result<usize> {
        let tables = self.tables.read().await;
        if filter.is_empty() {
            return Ok(tables.quotes.rows.len());
        }
        Ok(tables.quotes.rows.iter().filter(|q| filter.matches(q)).count())
    }

    async fn slice(
        &self,
        filter: &QuoteFilter,
        order: SortOrder,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Quote>> {
        let tables = self.tables.read().await;
        Ok(tables
            .matching(filter, order)
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn reindex(&self) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let total = self
            .commit(&mut tables, |staged| {
                let quotes = &mut staged.quotes;
                for (idx, quote) in quotes.rows.iter_mut().enumerate() {
                    quote.id = idx as u64 + 1;
                }
                quotes.next_id = quotes.rows.len() as u64 + 1;
                Ok(quotes.rows.len())
            })
            .await?;
        info!("Reindexed {total} quotes");
        Ok(total)
    }
}
