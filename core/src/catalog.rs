//! # Catalog Service
//!
//! CRUD use cases for every entity, plus the read models derived from them
//! (types and topics in use, the statistics report).
//!
//! Writes go through the same steps for every entity: field validation,
//! reference checks for quotes, then the store. Partial updates are applied
//! as a JSON merge onto the stored draft and re-validated as a whole.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use quotes_common::models::page::Page;
use quotes_common::models::quote::Quote;
use quotes_common::models::taxonomy::{QuoteType, Topic};
use quotes_common::models::{Record, Validate};
use quotes_common::{CatalogError, Result};
use serde_json::Value;

use crate::listing::ListingService;
use crate::statistics::StatisticsReport;
use crate::store::{QuoteStore, Repository};

#[derive(Clone)]
pub struct CatalogService {
    quotes: Arc<dyn QuoteStore>,
    quote_records: Arc<dyn Repository<Quote>>,
    pages: Arc<dyn Repository<Page>>,
    types: Arc<dyn Repository<QuoteType>>,
    topics: Arc<dyn Repository<Topic>>,
}

/// An entity the catalog can serve through the generic CRUD operations.
#[async_trait]
pub trait Catalogued: Record {
    fn repository(catalog: &CatalogService) -> &dyn Repository<Self>;

    /// Rejects drafts pointing at records that do not exist.
    async fn check_references(_catalog: &CatalogService, _draft: &Self::Draft) -> Result<()> {
        Ok(())
    }
}

impl CatalogService {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: QuoteStore + Repository<Page> + Repository<QuoteType> + Repository<Topic> + 'static,
    {
        Self {
            quotes: store.clone(),
            quote_records: store.clone(),
            pages: store.clone(),
            types: store.clone(),
            topics: store,
        }
    }

    pub fn quote_store(&self) -> Arc<dyn QuoteStore> {
        self.quotes.clone()
    }

    pub fn listing(&self) -> ListingService {
        ListingService::new(self.quotes.clone())
    }

    pub async fn list<T: Catalogued>(&self) -> Result<Vec<T>> {
        T::repository(self).all().await
    }

    pub async fn get<T: Catalogued>(&self, id: u64) -> Result<T> {
        T::repository(self)
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound { entity: T::NAME, id })
    }

    pub async fn create<T: Catalogued>(&self, draft: T::Draft) -> Result<T> {
        draft.validate()?;
        T::check_references(self, &draft).await?;
        T::repository(self).insert(draft).await
    }

    pub async fn create_many<T: Catalogued>(&self, drafts: Vec<T::Draft>) -> Result<Vec<T>> {
        for draft in &drafts {
            draft.validate()?;
            T::check_references(self, draft).await?;
        }
        T::repository(self).insert_many(drafts).await
    }

    pub async fn update<T: Catalogued>(&self, id: u64, draft: T::Draft) -> Result<T> {
        draft.validate()?;
        T::check_references(self, &draft).await?;
        T::repository(self)
            .replace(id, draft)
            .await?
            .ok_or(CatalogError::NotFound { entity: T::NAME, id })
    }

    /// Applies the fields present in `patch` on top of the stored record.
    pub async fn patch<T: Catalogued>(&self, id: u64, patch: Value) -> Result<T> {
        let current: T = self.get(id).await?;
        let draft = merge_patch::<T>(&current, patch)?;
        self.update(id, draft).await
    }

    pub async fn delete<T: Catalogued>(&self, id: u64) -> Result<()> {
        if T::repository(self).remove(id).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound { entity: T::NAME, id })
        }
    }

    /// Removes every record of `T`.
    pub async fn clear<T: Catalogued>(&self) -> Result<()> {
        T::repository(self).clear().await
    }

    pub async fn page_by_slug(&self, slug: &str) -> Result<Page> {
        self.pages
            .all()
            .await?
            .into_iter()
            .find(|page| page.slug == slug)
            .ok_or_else(|| CatalogError::KeyNotFound {
                entity: Page::NAME,
                key: slug.to_string(),
            })
    }

    /// Types carried by at least one quote, ordered by name.
    ///
    /// With `topic`, only types of quotes that also carry that topic.
    pub async fn types_in_use(&self, topic: Option<u64>) -> Result<Vec<QuoteType>> {
        let quotes = self.quote_records.all().await?;
        let used: HashSet<u64> = quotes
            .iter()
            .filter(|q| topic.is_none_or(|t| q.topics.contains(&t)))
            .flat_map(|q| q.types.iter().copied())
            .collect();

        let mut types: Vec<QuoteType> = self
            .types
            .all()
            .await?
            .into_iter()
            .filter(|t| used.contains(&t.id))
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(types)
    }

    /// Topics carried by at least one quote, ordered by name.
    ///
    /// With `type_id`, only topics of quotes that also carry that type.
    pub async fn topics_in_use(&self, type_id: Option<u64>) -> Result<Vec<Topic>> {
        let quotes = self.quote_records.all().await?;
        let used: HashSet<u64> = quotes
            .iter()
            .filter(|q| type_id.is_none_or(|t| q.types.contains(&t)))
            .flat_map(|q| q.topics.iter().copied())
            .collect();

        let mut topics: Vec<Topic> = self
            .topics
            .all()
            .await?
            .into_iter()
            .filter(|t| used.contains(&t.id))
            .collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(topics)
    }

    pub async fn statistics(&self) -> Result<StatisticsReport> {
        let quotes = self.quote_records.all().await?;
        let types = self.types.all().await?;
        let topics = self.topics.all().await?;
        Ok(StatisticsReport::compute(&quotes, &types, &topics))
    }
}

fn merge_patch<T: Record>(current: &T, patch: Value) -> Result<T::Draft> {
    let Value::Object(fields) = patch else {
        return Err(CatalogError::validation(
            "non_field_errors",
            "Expected a JSON object.",
        ));
    };

    let mut draft = serde_json::to_value(current.to_draft())?;
    if let Value::Object(existing) = &mut draft {
        for (key, value) in fields {
            if key != "id" && existing.contains_key(&key) {
                existing.insert(key, value);
            }
        }
    }

    serde_json::from_value(draft).map_err(|e| CatalogError::validation("non_field_errors", e.to_string()))
}

#[async_trait]
impl Catalogued for Quote {
    fn repository(catalog: &CatalogService) -> &dyn Repository<Self> {
        catalog.quote_records.as_ref()
    }

    async fn check_references(catalog: &CatalogService, draft: &Self::Draft) -> Result<()> {
        for id in &draft.types {
            if catalog.types.get(*id).await?.is_none() {
                return Err(CatalogError::validation(
                    "type",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                ));
            }
        }
        for id in &draft.topics {
            if catalog.topics.get(*id).await?.is_none() {
                return Err(CatalogError::validation(
                    "topics",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Catalogued for Page {
    fn repository(catalog: &CatalogService) -> &dyn Repository<Self> {
        catalog.pages.as_ref()
    }
}

#[async_trait]
impl Catalogued for QuoteType {
    fn repository(catalog: &CatalogService) -> &dyn Repository<Self> {
        catalog.types.as_ref()
    }
}

#[async_trait]
impl Catalogued for Topic {
    fn repository(catalog: &CatalogService) -> &dyn Repository<Self> {
        catalog.topics.as_ref()
    }
}
