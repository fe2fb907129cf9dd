//! # Page Merger
//!
//! Splits an ordered collection of `total_count` items into page windows of
//! `page_size` items, folding the undersized remainder into a neighbouring
//! page instead of exposing a short page of its own.
//!
//! The side that absorbs the remainder follows the sort direction:
//! * ascending by id: the **last** page is merged ([`MergeSide::Tail`]).
//! * descending by id: the **first** page is merged ([`MergeSide::Head`]).
//!
//! ```text
//! total = 250, page_size = 100
//!
//! ascending   [ 1 ..... 100 ][ 101 ............ 250 ]
//! descending  [ 1 ............ 150 ][ 151 ..... 250 ]
//! ```
//!
//! Every page therefore holds between `page_size` and `2 * page_size - 1`
//! items. Nothing here performs I/O: callers translate a [`PageSlice`] into an
//! offset/limit query against the record store.

use std::ops::Range;

use quotes_common::{CatalogError, Result};

pub mod envelope;

pub use envelope::{PageDescriptor, PagesInfo, PaginatedResponse, page_label};

/// Which end of the collection absorbs the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeSide {
    Head,
    Tail,
}

impl MergeSide {
    pub fn for_direction(descending: bool) -> Self {
        if descending { Self::Head } else { Self::Tail }
    }
}

/// Page boundaries for one collection size, page size and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    total_count: usize,
    page_size: usize,
    merge_side: MergeSide,
}

/// One resolved page: where it sits in the collection and in the numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    /// 1-based page number within the adjusted numbering.
    pub number: usize,
    /// 0-based offset of the first item.
    pub offset: usize,
    /// Number of items on the page.
    pub limit: usize,
    pub total_pages: usize,
}

impl PageLayout {
    pub fn new(total_count: usize, page_size: usize, descending: bool) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::InvalidPageSize);
        }

        Ok(Self {
            total_count,
            page_size,
            merge_side: MergeSide::for_direction(descending),
        })
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn merge_side(&self) -> MergeSide {
        self.merge_side
    }

    /// Page count under plain `ceil(total / page_size)` slicing.
    pub fn standard_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    /// Items folded into the merged page, zero when nothing is merged.
    pub fn remainder(&self) -> usize {
        if self.standard_pages() > 1 {
            self.total_count % self.page_size
        } else {
            0
        }
    }

    pub fn is_merged(&self) -> bool {
        self.remainder() > 0
    }

    /// Adjusted page count.
    pub fn total_pages(&self) -> usize {
        if self.is_merged() {
            self.standard_pages() - 1
        } else {
            self.standard_pages()
        }
    }

    /// Number of the page that absorbed the remainder, if any.
    pub fn merged_page(&self) -> Option<usize> {
        if !self.is_merged() {
            return None;
        }
        match self.merge_side {
            MergeSide::Head => Some(1),
            MergeSide::Tail => Some(self.total_pages()),
        }
    }

    /// Item offsets covered by page `number`, or `None` outside `1..=total_pages`.
    pub fn bounds(&self, number: usize) -> Option<Range<usize>> {
        let total_pages = self.total_pages();
        if number == 0 || number > total_pages {
            return None;
        }

        let size = self.page_size;
        let remainder = self.remainder();

        let range = match self.merge_side {
            MergeSide::Head if remainder > 0 => {
                if number == 1 {
                    0..size + remainder
                } else {
                    let start = size + remainder + (number - 2) * size;
                    start..start + size
                }
            }
            _ => {
                let start = (number - 1) * size;
                let end = if number == total_pages {
                    self.total_count
                } else {
                    start + size
                };
                start..end
            }
        };

        Some(range)
    }

    pub fn resolve(&self, number: usize) -> Option<PageSlice> {
        let range = self.bounds(number)?;
        Some(PageSlice {
            number,
            offset: range.start,
            limit: range.len(),
            total_pages: self.total_pages(),
        })
    }

    /// Every adjusted page in order.
    pub fn pages(&self) -> impl Iterator<Item = PageSlice> + '_ {
        (1..=self.total_pages()).filter_map(|number| self.resolve(number))
    }
}

impl PageSlice {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.limit
    }

    /// 1-based position of the first item.
    pub fn start_item(&self) -> usize {
        self.offset + 1
    }

    /// 1-based position of the last item.
    pub fn end_item(&self) -> usize {
        self.offset + self.limit
    }
}

/// Resolves `page_number` in one call; `Ok(None)` means the page does not exist.
pub fn resolve_page(
    total_count: usize,
    page_size: usize,
    page_number: usize,
    descending: bool,
) -> Result<Option<PageSlice>> {
    Ok(PageLayout::new(total_count, page_size, descending)?.resolve(page_number))
}
