//! # Quote Listing Service
//!
//! Implements the quote listing use case on top of the [`QuoteStore`] port
//! and the [`pagination`](crate::pagination) arithmetic.
//!
//! A request goes down exactly one of three paths:
//! 1. **Position**: one quote at a 1-based rank, no pagination at all.
//! 2. **Filtered**: `search`, `type` or `topic` present, every match on one page.
//! 3. **Paged**: the page merger picks the window; an unknown page yields an
//!    empty envelope rather than an error.

use std::sync::Arc;

use quotes_common::models::quote::{Quote, QuoteResource};
use quotes_common::{CatalogError, Result};
use tracing::debug;

use crate::pagination::{PageDescriptor, PageLayout, PagesInfo, PaginatedResponse};
use crate::query::{ListQuery, QuoteFilter, Selection, SortOrder};
use crate::store::QuoteStore;

/// Outcome of the listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Page(PaginatedResponse<QuoteResource>),
    /// The quote found by `position`.
    Single(QuoteResource),
}

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn QuoteStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Listing> {
        let number = match query.selection {
            Selection::Position(position) => {
                let quote = self.quote_at(&query.filter, query.order, position).await?;
                return Ok(Listing::Single(quote.into()));
            }
            Selection::Page(number) => number,
        };

        let total = self.store.count(&query.filter).await?;

        if query.pagination_disabled {
            let quotes = self.store.slice(&query.filter, query.order, 0, total).await?;
            debug!("Pagination disabled by filters, returning {} quotes", quotes.len());
            let response = PaginatedResponse::unpaginated(quotes).map(QuoteResource::from);
            return Ok(Listing::Page(response));
        }

        let layout = PageLayout::new(total, query.page_size, query.order.is_descending())?;
        let response = match layout.resolve(number) {
            Some(slice) => {
                let quotes = self
                    .store
                    .slice(&query.filter, query.order, slice.offset, slice.limit)
                    .await?;
                PaginatedResponse::for_page(total, &slice, query.page_size, quotes, |q| q.id)
            }
            None => {
                debug!(
                    "Page {number} requested but only {} exist",
                    layout.total_pages()
                );
                PaginatedResponse::empty(total, layout.total_pages(), number, query.page_size)
            }
        };

        Ok(Listing::Page(response.map(QuoteResource::from)))
    }

    /// The quote at 1-based `position` within the filtered, ordered collection.
    pub async fn quote_at(&self, filter: &QuoteFilter, order: SortOrder, position: i64) -> Result<Quote> {
        let total_count = self.store.count(filter).await?;

        let offset = match usize::try_from(position) {
            Ok(p) if (1..=total_count).contains(&p) => p - 1,
            _ => return Err(CatalogError::PositionOutOfRange { total_count }),
        };

        // The count and the slice are separate reads; a concurrent delete can
        // leave the position empty.
        self.store
            .slice(filter, order, offset, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::KeyNotFound {
                entity: "Quote",
                key: format!("position {position}"),
            })
    }

    /// Describes every adjusted page for the current filters and ordering.
    pub async fn pages_info(&self, query: &ListQuery) -> Result<PagesInfo> {
        let total_count = self.store.count(&query.filter).await?;

        if query.pagination_disabled {
            return Ok(PagesInfo::disabled(total_count));
        }

        let layout = PageLayout::new(total_count, query.page_size, query.order.is_descending())?;
        let mut pages = Vec::with_capacity(layout.total_pages());

        for slice in layout.pages() {
            let first = self.store.id_at(&query.filter, query.order, slice.offset).await?;
            let last = self
                .store
                .id_at(&query.filter, query.order, slice.end_item() - 1)
                .await?;
            pages.push(PageDescriptor::new(&slice, first.zip(last)));
        }

        Ok(PagesInfo {
            total_count,
            total_pages: layout.total_pages(),
            page_size: query.page_size,
            pages,
            pagination_disabled: false,
        })
    }

    pub async fn total_count(&self, filter: &QuoteFilter) -> Result<usize> {
        self.store.count(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RawListParams;
    use crate::store::{MemoryStore, Repository};
    use quotes_common::config::PaginationConfig;
    use quotes_common::models::quote::QuoteDraft;

    async fn service(n: usize) -> ListingService {
        let store = MemoryStore::new();
        for i in 1..=n {
            let draft = QuoteDraft {
                quote: format!("Quote number {i}"),
                types: if i % 2 == 0 { vec![1] } else { vec![] },
                ..QuoteDraft::default()
            };
            Repository::<Quote>::insert(&store, draft).await.unwrap();
        }
        ListingService::new(Arc::new(store))
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut raw = RawListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "ordering" => raw.ordering = value,
                "page" => raw.page = value,
                "page_size" => raw.page_size = value,
                "search" => raw.search = value,
                "type" => raw.type_id = value,
                "position" => raw.position = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        ListQuery::parse(&raw, &PaginationConfig::default()).unwrap()
    }

    fn page(listing: Listing) -> PaginatedResponse<QuoteResource> {
        match listing {
            Listing::Page(page) => page,
            Listing::Single(quote) => panic!("expected a page, got quote {}", quote.id),
        }
    }

    #[tokio::test]
    async fn ascending_tail_page_is_merged() {
        let service = service(250).await;
        let response = page(service.list(&query(&[("ordering", "id"), ("page", "2")])).await.unwrap());

        assert_eq!(response.count, 250);
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.items_on_page, 150);
        assert_eq!((response.start_item, response.end_item), (101, 250));
        assert_eq!(response.page_label, "101 - 250");
    }

    #[tokio::test]
    async fn descending_head_page_is_merged() {
        let service = service(250).await;
        let first = page(service.list(&query(&[("ordering", "-id")])).await.unwrap());
        assert_eq!(first.items_on_page, 150);
        assert_eq!(first.page_label, "101 - 250");
        assert_eq!(first.results[0].id, 250);

        let second = page(service.list(&query(&[("ordering", "-id"), ("page", "2")])).await.unwrap());
        assert_eq!(second.items_on_page, 100);
        assert_eq!((second.start_item, second.end_item), (151, 250));
        assert_eq!(second.page_label, "1 - 100");
    }

    #[tokio::test]
    async fn page_overflow_is_an_empty_page() {
        let service = service(250).await;
        let response = page(service.list(&query(&[("page", "3")])).await.unwrap());
        assert!(response.results.is_empty());
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.current_page, 3);
        assert_eq!(response.count, 250);
    }

    #[tokio::test]
    async fn empty_catalog_has_no_pages() {
        let service = service(0).await;
        let response = page(service.list(&query(&[])).await.unwrap());
        assert_eq!(response.total_pages, 0);
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn filters_disable_pagination() {
        let service = service(250).await;
        let response = page(service.list(&query(&[("type", "1"), ("page", "2")])).await.unwrap());
        assert_eq!(response.total_pages, 1);
        assert_eq!(response.count, 125);
        assert_eq!(response.results.len(), 125);
        assert_eq!(response.page_label, "1 - 125");
    }

    #[tokio::test]
    async fn position_returns_one_quote() {
        let service = service(250).await;
        let listing = service.list(&query(&[("ordering", "id"), ("position", "1")])).await.unwrap();
        assert!(matches!(listing, Listing::Single(ref q) if q.id == 1));

        let listing = service.list(&query(&[("ordering", "-id"), ("position", "1")])).await.unwrap();
        assert!(matches!(listing, Listing::Single(ref q) if q.id == 250));
    }

    #[tokio::test]
    async fn position_out_of_range_reports_the_total() {
        let service = service(250).await;
        for position in ["251", "0", "-1", "99999999999999999999"] {
            let err = service.list(&query(&[("position", position)])).await.unwrap_err();
            assert!(matches!(err, CatalogError::PositionOutOfRange { total_count: 250 }));
        }
    }

    #[tokio::test]
    async fn position_respects_filters() {
        let service = service(10).await;
        let listing = service
            .list(&query(&[("type", "1"), ("ordering", "id"), ("position", "2")]))
            .await
            .unwrap();
        assert!(matches!(listing, Listing::Single(ref q) if q.id == 4));
    }

    #[tokio::test]
    async fn pages_info_descending() {
        let service = service(250).await;
        let info = service.pages_info(&query(&[("ordering", "-id")])).await.unwrap();

        assert!(!info.pagination_disabled);
        assert_eq!(info.total_pages, 2);
        assert_eq!(info.pages[0].items_count, 150);
        assert_eq!(info.pages[0].label, "101 - 250");
        assert_eq!((info.pages[1].start_item, info.pages[1].end_item), (151, 250));
        assert_eq!(info.pages[1].label, "1 - 100");
        let total: usize = info.pages.iter().map(|p| p.items_count).sum();
        assert_eq!(total, 250);
    }

    #[tokio::test]
    async fn pages_info_when_filtered() {
        let service = service(250).await;
        let info = service.pages_info(&query(&[("search", "quote")])).await.unwrap();
        assert_eq!(info, PagesInfo::disabled(250));
    }

    #[tokio::test]
    async fn total_count_applies_filters() {
        let service = service(9).await;
        let filtered = query(&[("type", "1")]);
        assert_eq!(service.total_count(&filtered.filter).await.unwrap(), 4);
        assert_eq!(service.total_count(&QuoteFilter::all()).await.unwrap(), 9);
    }
}
