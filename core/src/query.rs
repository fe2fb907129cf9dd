//! # Listing Queries
//!
//! Turns raw query-string parameters into an immutable [`ListQuery`].
//!
//! The filter view is built once, up front: when `search` is present the
//! `type` and `topic` parameters are dropped from it, so the filtering step
//! never has to look at (or patch) the original request.

use fancy_regex::Regex;
use quotes_common::config::PaginationConfig;
use quotes_common::models::quote::Quote;
use quotes_common::{CatalogError, Result};
use serde::Deserialize;
use std::num::IntErrorKind;

/// Order of the quote collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Shortest quotes first, ties broken by id.
    #[default]
    Length,
    IdAscending,
    IdDescending,
}

impl SortOrder {
    /// Parses the `ordering` parameter. Unknown fields keep the default order.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("id") => Self::IdAscending,
            Some("-id") => Self::IdDescending,
            _ => Self::Length,
        }
    }

    /// Whether the merged page sits at the head of the collection.
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::IdDescending)
    }

    pub fn sort(&self, quotes: &mut [Quote]) {
        match self {
            Self::Length => quotes.sort_by_key(|q| (q.signs(), q.id)),
            Self::IdAscending => quotes.sort_by_key(|q| q.id),
            Self::IdDescending => quotes.sort_by_key(|q| std::cmp::Reverse(q.id)),
        }
    }
}

/// Case-insensitive term match anchored at a word start.
///
/// The term must follow a non-word character, the start of the text, or an
/// opening angle quote.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    term: String,
    regex: Regex,
}

impl SearchPattern {
    pub fn new(term: &str) -> Result<Self> {
        let pattern = format!(r"(?i)(?:\W|^|«){}", fancy_regex::escape(term));
        let regex = Regex::new(&pattern)
            .map_err(|_| CatalogError::invalid_parameter("search", term))?;

        Ok(Self {
            term: term.to_string(),
            regex,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or(false)
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        self.is_match(&quote.quote) || self.is_match(&quote.author) || self.is_match(&quote.book)
    }
}

/// Predicate over quotes; the empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub search: Option<SearchPattern>,
    pub type_id: Option<u64>,
    pub topic_id: Option<u64>,
}

impl QuoteFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.type_id.is_none() && self.topic_id.is_none()
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        if let Some(search) = &self.search {
            if !search.matches(quote) {
                return false;
            }
        }
        if let Some(type_id) = self.type_id {
            if !quote.types.contains(&type_id) {
                return false;
            }
        }
        if let Some(topic_id) = self.topic_id {
            if !quote.topics.contains(&topic_id) {
                return false;
            }
        }
        true
    }
}

/// Query-string parameters of the quote listing, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_id: Option<String>,
    pub topic: Option<String>,
    pub position: Option<String>,
}

/// What the client asked for, once the raw parameters are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A 1-based page number. Non-positive numbers become `0`, which never resolves.
    Page(usize),
    /// A 1-based rank inside the filtered, ordered collection.
    Position(i64),
}

#[derive(Debug, Clone)]
pub struct ListQuery {
    pub filter: QuoteFilter,
    pub order: SortOrder,
    pub page_size: usize,
    pub selection: Selection,
    /// Search, type or topic was supplied; everything goes on one page.
    pub pagination_disabled: bool,
}

impl ListQuery {
    pub fn parse(raw: &RawListParams, pagination: &PaginationConfig) -> Result<Self> {
        let search = non_empty(&raw.search);
        let type_id = non_empty(&raw.type_id);
        let topic = non_empty(&raw.topic);

        let filter = match search {
            Some(term) => QuoteFilter {
                search: match term.trim() {
                    "" => None,
                    trimmed => Some(SearchPattern::new(trimmed)?),
                },
                ..QuoteFilter::default()
            },
            None => QuoteFilter {
                search: None,
                type_id: type_id.map(|v| parse_id("type", v)).transpose()?,
                topic_id: topic.map(|v| parse_id("topic", v)).transpose()?,
            },
        };

        let selection = match non_empty(&raw.position) {
            Some(position) => {
                Selection::Position(parse_int("position", position)?.unwrap_or(i64::MAX))
            }
            None => {
                let page = match non_empty(&raw.page) {
                    Some(page) => parse_int("page", page)?.unwrap_or(0),
                    None => 1,
                };
                Selection::Page(usize::try_from(page).unwrap_or(0))
            }
        };

        Ok(Self {
            filter,
            order: SortOrder::parse(raw.ordering.as_deref()),
            page_size: pagination.effective_page_size(raw.page_size.as_deref()),
            selection,
            pagination_disabled: search.is_some() || type_id.is_some() || topic.is_some(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// `Ok(None)` for a well-formed integer that does not fit in `i64`.
fn parse_int(name: &'static str, raw: &str) -> Result<Option<i64>> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(_) => Err(CatalogError::invalid_parameter(name, raw)),
    }
}

/// Parses a record id received as a query parameter.
pub fn parse_id(name: &'static str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| CatalogError::invalid_parameter(name, raw))
}
