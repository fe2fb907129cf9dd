//! # Maintenance
//!
//! Bulk operations run from the command line: synthetic data generation, id
//! renumbering and the id continuity report.

use std::collections::HashSet;

use quotes_common::Result;
use quotes_common::models::Record;
use quotes_common::models::quote::{Quote, QuoteDraft};
use quotes_common::models::taxonomy::{QuoteType, QuoteTypeDraft};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogService;

/// Gap lists longer than this are only counted.
pub const MAX_LISTED_GAPS: usize = 10;

pub const GENERATED_TYPES: &[&str] = &[
    "Philosophical",
    "Motivational",
    "About life",
    "About love",
    "About friendship",
    "About success",
    "About happiness",
    "About wisdom",
    "Humorous",
    "Historical",
    "Literary",
    "Scientific",
];

const AUTHORS: &[&str] = &[
    "Alexander Pushkin",
    "Leo Tolstoy",
    "Fyodor Dostoevsky",
    "Anton Chekhov",
    "Mikhail Lermontov",
    "Ivan Turgenev",
    "Nikolai Gogol",
    "Anna Akhmatova",
    "Albert Einstein",
    "Mark Twain",
    "William Shakespeare",
    "Oscar Wilde",
    "Ernest Hemingway",
    "George Orwell",
    "Charles Dickens",
    "Confucius",
    "Socrates",
    "Plato",
    "Aristotle",
    "Mahatma Gandhi",
    "Nikola Tesla",
    "Isaac Newton",
];

const BOOKS: &[&str] = &[
    "War and Peace",
    "Crime and Punishment",
    "Anna Karenina",
    "The Master and Margarita",
    "Eugene Onegin",
    "Dead Souls",
    "Fathers and Sons",
    "1984",
    "The Great Gatsby",
    "Pride and Prejudice",
    "Jane Eyre",
    "Don Quixote",
    "Hamlet",
    "King Lear",
    "Faust",
    "The Odyssey",
];

const FIRST_NAMES: &[&str] = &["Anna", "Boris", "Clara", "David", "Elena", "Felix", "Greta", "Hugo"];
const LAST_NAMES: &[&str] = &["Ivanova", "Keller", "Moreau", "Novak", "Olsen", "Petrov", "Rossi", "Weber"];

const WORDS: &[&str] = &[
    "time", "life", "world", "light", "heart", "truth", "silence", "river", "memory", "road",
    "freedom", "reason", "beauty", "fear", "hope", "always", "never", "quietly", "slowly",
    "every", "nothing", "between", "under", "without", "becomes", "remains", "teaches",
    "forgets", "returns", "carries", "the", "a", "of", "and", "is", "in", "who", "what",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub count: usize,
    /// Drop every quote and type before generating.
    pub clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub generated: usize,
    pub total_quotes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReindexReport {
    pub total: usize,
    /// Id range before renumbering, `None` for an empty catalog.
    pub previous_range: Option<(u64, u64)>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdReport {
    pub total: usize,
    pub first_id: Option<u64>,
    pub last_id: Option<u64>,
    pub gap_count: usize,
    /// The missing ids, only filled when there are at most [`MAX_LISTED_GAPS`].
    pub missing: Vec<u64>,
}

impl IdReport {
    pub fn from_ids(ids: &[u64]) -> Self {
        let (Some(&first), Some(&last)) = (ids.iter().min(), ids.iter().max()) else {
            return Self::default();
        };

        let present: HashSet<u64> = ids.iter().copied().collect();
        let missing: Vec<u64> = (first..=last).filter(|id| !present.contains(id)).collect();

        Self {
            total: ids.len(),
            first_id: Some(first),
            last_id: Some(last),
            gap_count: missing.len(),
            missing: if missing.len() <= MAX_LISTED_GAPS { missing } else { Vec::new() },
        }
    }

    pub fn starts_at_one(&self) -> bool {
        self.first_id == Some(1)
    }

    pub fn has_gaps(&self) -> bool {
        self.gap_count > 0
    }

    /// Ids are exactly `1..=total`.
    pub fn is_sequential(&self) -> bool {
        self.starts_at_one() && self.last_id == Some(self.total as u64) && !self.has_gaps()
    }
}

pub async fn check_ids(catalog: &CatalogService) -> Result<IdReport> {
    let quotes = catalog.list::<Quote>().await?;
    let ids: Vec<u64> = quotes.iter().map(Record::id).collect();
    Ok(IdReport::from_ids(&ids))
}

/// Renumbers quotes `1..=n`. With `dry_run` only the report is produced.
pub async fn reindex(catalog: &CatalogService, dry_run: bool) -> Result<ReindexReport> {
    let quotes = catalog.list::<Quote>().await?;
    let previous_range = quotes.first().zip(quotes.last()).map(|(f, l)| (f.id, l.id));

    if dry_run || quotes.is_empty() {
        return Ok(ReindexReport {
            total: quotes.len(),
            previous_range,
            dry_run,
        });
    }

    let total = catalog.quote_store().reindex().await?;
    Ok(ReindexReport {
        total,
        previous_range,
        dry_run,
    })
}

pub async fn generate(catalog: &CatalogService, options: GenerateOptions) -> Result<GenerateReport> {
    if options.clear {
        info!("Clearing existing quotes and types");
        catalog.clear::<Quote>().await?;
        catalog.clear::<QuoteType>().await?;
    }

    let type_ids = ensure_types(catalog).await?;

    let drafts = {
        let mut rng = rand::rng();
        synthetic_quotes(&mut rng, options.count, &type_ids)
    };

    let created = catalog.create_many::<Quote>(drafts).await?;
    let total_quotes = catalog.list::<Quote>().await?.len();
    info!("Generated {} quotes, {} in the catalog", created.len(), total_quotes);

    Ok(GenerateReport {
        generated: created.len(),
        total_quotes,
    })
}

/// Ids of the generator's types, creating the missing ones.
async fn ensure_types(catalog: &CatalogService) -> Result<Vec<u64>> {
    let existing = catalog.list::<QuoteType>().await?;
    let mut ids = Vec::with_capacity(GENERATED_TYPES.len());

    for name in GENERATED_TYPES {
        let id = match existing.iter().find(|t| t.name == *name) {
            Some(found) => found.id,
            None => {
                catalog
                    .create::<QuoteType>(QuoteTypeDraft {
                        name: name.to_string(),
                    })
                    .await?
                    .id
            }
        };
        ids.push(id);
    }
    Ok(ids)
}

/// Quotes in four equal shares: long, medium, short and very short texts.
pub fn synthetic_quotes<R: Rng + ?Sized>(rng: &mut R, count: usize, type_ids: &[u64]) -> Vec<QuoteDraft> {
    (0..count)
        .map(|i| {
            let quote = match i % 4 {
                0 => text(rng, 400..=800),
                1 => text(rng, 200..=400),
                2 => text(rng, 50..=200),
                _ => {
                    let words = rng.random_range(3..=10);
                    sentence(rng, words)
                }
            };

            let author = if rng.random_bool(0.9) {
                pick(rng, AUTHORS)
            } else {
                format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
            };

            let book = if rng.random_bool(0.7) {
                pick(rng, BOOKS)
            } else {
                let words = rng.random_range(2..=4);
                sentence(rng, words).trim_end_matches('.').to_string()
            };

            let how_many = rng.random_range(1..=type_ids.len().clamp(1, 3));
            let types = type_ids.choose_multiple(rng, how_many).copied().collect();

            QuoteDraft {
                quote,
                author,
                book,
                types,
                topics: Vec::new(),
            }
        })
        .collect()
}

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let body: Vec<&str> = (0..words).filter_map(|_| WORDS.choose(rng).copied()).collect();
    format!("{}.", capitalize(&body.join(" ")))
}

/// Sentences until the text length lands in `chars`.
fn text<R: Rng + ?Sized>(rng: &mut R, chars: std::ops::RangeInclusive<usize>) -> String {
    let target = rng.random_range(chars.clone());
    let mut out = String::new();

    while out.chars().count() < target {
        if !out.is_empty() {
            out.push(' ');
        }
        let words = rng.random_range(5..=14);
        out.push_str(&sentence(rng, words));
    }

    let max = *chars.end();
    if out.chars().count() > max {
        out = out.chars().take(max - 3).collect::<String>().trim_end().to_string();
        out.push_str("...");
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
