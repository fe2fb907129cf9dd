#![cfg(test)]
use std::sync::Arc;

use quotes_common::config::PaginationConfig;
use quotes_common::models::quote::Quote;
use quotes_core::catalog::CatalogService;
use quotes_core::listing::Listing;
use quotes_core::maintenance::{self, GenerateOptions};
use quotes_core::query::{ListQuery, RawListParams};
use quotes_core::store::MemoryStore;

use crate::support::catalog_with;

fn query(ordering: &str, page: usize, page_size: usize) -> ListQuery {
    let raw = RawListParams {
        ordering: Some(ordering.to_string()),
        page: Some(page.to_string()),
        page_size: Some(page_size.to_string()),
        ..RawListParams::default()
    };
    ListQuery::parse(&raw, &PaginationConfig::default()).unwrap()
}

/// Walking every page must visit each quote exactly once, in order, with
/// every page between `size` and `2 * size - 1` items.
#[tokio::test]
async fn every_page_walk_covers_the_catalog() {
    for total in [0, 1, 9, 10, 11, 19, 20, 21, 57] {
        let listing = catalog_with(total).await.listing();

        for ordering in ["id", "-id"] {
            let info = listing.pages_info(&query(ordering, 1, 10)).await.unwrap();
            let mut seen = Vec::new();

            for page in 1..=info.total_pages {
                let Listing::Page(envelope) = listing.list(&query(ordering, page, 10)).await.unwrap() else {
                    panic!("expected a page envelope");
                };
                if info.total_pages > 1 {
                    assert!((10..20).contains(&envelope.items_on_page), "total {total} {ordering} page {page}");
                }
                assert_eq!(envelope.items_on_page, info.pages[page - 1].items_count);
                seen.extend(envelope.results.iter().map(|q| q.id));
            }

            let mut expected: Vec<u64> = (1..=total as u64).collect();
            if ordering == "-id" {
                expected.reverse();
            }
            assert_eq!(seen, expected, "total {total} ordering {ordering}");
        }
    }
}

#[tokio::test]
async fn generated_catalog_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");

    let catalog = CatalogService::new(Arc::new(MemoryStore::open(&path).await.unwrap()));
    maintenance::generate(&catalog, GenerateOptions { count: 40, clear: false })
        .await
        .unwrap();
    catalog.delete::<Quote>(3).await.unwrap();
    maintenance::reindex(&catalog, false).await.unwrap();

    let reopened = CatalogService::new(Arc::new(MemoryStore::open(&path).await.unwrap()));
    let report = maintenance::check_ids(&reopened).await.unwrap();
    assert_eq!(report.total, 39);
    assert!(report.is_sequential());

    let before = catalog.listing().list(&query("length", 1, 10)).await.unwrap();
    let after = reopened.listing().list(&query("length", 1, 10)).await.unwrap();
    assert_eq!(before, after);
}
