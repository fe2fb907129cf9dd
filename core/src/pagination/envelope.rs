//! Response envelopes built from resolved pages.

use serde::Serialize;

use super::PageSlice;

/// Display label `"min - max"` for the ids at a page's boundaries.
pub fn page_label(first_id: u64, last_id: u64) -> String {
    format!("{} - {}", first_id.min(last_id), last_id.max(first_id))
}

/// Listing response for one page of results.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub items_on_page: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub page_label: String,
    /// Link generation is not implemented; always `null`.
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Envelope for a page the merger resolved.
    ///
    /// `ids` yields the id of each result so the label can use the real
    /// boundary ids; positions are used when the page came back empty.
    pub fn for_page(
        count: usize,
        slice: &PageSlice,
        page_size: usize,
        results: Vec<T>,
        id_of: impl Fn(&T) -> u64,
    ) -> Self {
        let start_item = slice.start_item();
        let end_item = slice.start_item() + results.len().saturating_sub(1);
        let page_label = match (results.first(), results.last()) {
            (Some(first), Some(last)) => page_label(id_of(first), id_of(last)),
            _ => format!("{} - {}", start_item, slice.end_item()),
        };

        Self {
            count,
            total_pages: slice.total_pages,
            current_page: slice.number,
            page_size,
            items_on_page: results.len(),
            start_item,
            end_item: if results.is_empty() { slice.end_item() } else { end_item },
            page_label,
            next: None,
            previous: None,
            results,
        }
    }

    /// Envelope for a page number outside the adjusted numbering.
    pub fn empty(count: usize, total_pages: usize, requested_page: usize, page_size: usize) -> Self {
        Self {
            count,
            total_pages,
            current_page: requested_page,
            page_size,
            items_on_page: 0,
            start_item: 0,
            end_item: 0,
            page_label: "0 - 0".to_string(),
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }

    /// Everything on one page, used when filters switch pagination off.
    pub fn unpaginated(results: Vec<T>) -> Self {
        let count = results.len();
        Self {
            count,
            total_pages: 1,
            current_page: 1,
            page_size: count,
            items_on_page: count,
            start_item: 1,
            end_item: count,
            page_label: format!("1 - {count}"),
            next: None,
            previous: None,
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            count: self.count,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            items_on_page: self.items_on_page,
            start_item: self.start_item,
            end_item: self.end_item,
            page_label: self.page_label,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Summary of one adjusted page for the pages-info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    pub page: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub items_count: usize,
    pub label: String,
}

impl PageDescriptor {
    /// `boundary_ids` are the ids of the first and last item on the page.
    pub fn new(slice: &PageSlice, boundary_ids: Option<(u64, u64)>) -> Self {
        let label = match boundary_ids {
            Some((first, last)) => page_label(first, last),
            None => format!("{} - {}", slice.start_item(), slice.end_item()),
        };

        Self {
            page: slice.number,
            start_item: slice.start_item(),
            end_item: slice.end_item(),
            items_count: slice.limit,
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagesInfo {
    pub total_count: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub pages: Vec<PageDescriptor>,
    pub pagination_disabled: bool,
}

impl PagesInfo {
    pub fn disabled(total_count: usize) -> Self {
        Self {
            total_count,
            total_pages: 0,
            page_size: 0,
            pages: Vec::new(),
            pagination_disabled: true,
        }
    }
}
