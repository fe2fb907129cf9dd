//! Aggregate counts over the whole catalog, used by the statistics endpoint
//! and the `stats` command.

use std::collections::HashMap;

use quotes_common::models::quote::Quote;
use quotes_common::models::taxonomy::{QuoteType, Topic};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub id: u64,
    pub name: String,
    pub quote_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub full_name: String,
    pub surname: String,
    pub quote_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsReport {
    pub total_quotes: usize,
    pub type_stats: Vec<TermCount>,
    pub quotes_without_types: usize,
    pub topic_stats: Vec<TermCount>,
    pub quotes_without_topics: usize,
    pub author_stats: Vec<AuthorCount>,
    pub quotes_without_authors: usize,
}

impl StatisticsReport {
    pub fn compute(quotes: &[Quote], types: &[QuoteType], topics: &[Topic]) -> Self {
        let type_stats = term_counts(
            types.iter().map(|t| (t.id, t.name.as_str())),
            quotes.iter().flat_map(|q| q.types.iter().copied()),
        );
        let topic_stats = term_counts(
            topics.iter().map(|t| (t.id, t.name.as_str())),
            quotes.iter().flat_map(|q| q.topics.iter().copied()),
        );

        Self {
            total_quotes: quotes.len(),
            type_stats,
            quotes_without_types: quotes.iter().filter(|q| q.types.is_empty()).count(),
            topic_stats,
            quotes_without_topics: quotes.iter().filter(|q| q.topics.is_empty()).count(),
            author_stats: author_counts(quotes),
            quotes_without_authors: quotes.iter().filter(|q| !q.has_author()).count(),
        }
    }
}

/// Second word of the name, or the first when there is only one.
pub fn surname(full_name: &str) -> &str {
    let mut words = full_name.split_whitespace();
    let first = words.next().unwrap_or(full_name);
    words.next().unwrap_or(first)
}

fn term_counts<'a>(
    terms: impl Iterator<Item = (u64, &'a str)>,
    usages: impl Iterator<Item = u64>,
) -> Vec<TermCount> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for id in usages {
        *counts.entry(id).or_default() += 1;
    }

    let mut stats: Vec<TermCount> = terms
        .filter_map(|(id, name)| {
            counts.get(&id).map(|&quote_count| TermCount {
                id,
                name: name.to_string(),
                quote_count,
            })
        })
        .collect();
    stats.sort_by(|a, b| b.quote_count.cmp(&a.quote_count).then(a.id.cmp(&b.id)));
    stats
}

fn author_counts(quotes: &[Quote]) -> Vec<AuthorCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for quote in quotes.iter().filter(|q| q.has_author()) {
        *counts.entry(quote.author.trim()).or_default() += 1;
    }

    let mut stats: Vec<AuthorCount> = counts
        .into_iter()
        .map(|(name, quote_count)| AuthorCount {
            full_name: name.to_string(),
            surname: surname(name).to_string(),
            quote_count,
        })
        .collect();
    stats.sort_by_cached_key(|a| (a.surname.to_lowercase(), a.full_name.clone()));
    stats
}
