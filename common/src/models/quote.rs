use serde::{Deserialize, Serialize};

use super::{MAX_CHAR_FIELD, Record, Validate, max_chars, require};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub book: String,
    /// Ids of the [`QuoteType`](super::taxonomy::QuoteType)s this quote belongs to.
    #[serde(rename = "type", default)]
    pub types: Vec<u64>,
    #[serde(default)]
    pub topics: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub book: String,
    #[serde(rename = "type", default)]
    pub types: Vec<u64>,
    #[serde(default)]
    pub topics: Vec<u64>,
}

/// Display size bucket derived from the quote length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Min,
    Under,
    Middle,
    Upper,
    Max,
}

impl FontSize {
    pub fn for_signs(signs: usize) -> Self {
        match signs {
            s if s > 600 => Self::Min,
            s if s > 400 => Self::Under,
            s if s > 300 => Self::Middle,
            s if s > 100 => Self::Upper,
            _ => Self::Max,
        }
    }
}

impl Quote {
    /// Number of characters in the quote text.
    pub fn signs(&self) -> usize {
        self.quote.chars().count()
    }

    pub fn font_size(&self) -> FontSize {
        FontSize::for_signs(self.signs())
    }

    pub fn has_author(&self) -> bool {
        !self.author.trim().is_empty()
    }
}

impl Record for Quote {
    type Draft = QuoteDraft;

    const NAME: &'static str = "Quote";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: QuoteDraft) -> Self {
        let mut types = draft.types;
        let mut topics = draft.topics;
        types.sort_unstable();
        types.dedup();
        topics.sort_unstable();
        topics.dedup();

        Self {
            id,
            quote: draft.quote,
            author: draft.author,
            book: draft.book,
            types,
            topics,
        }
    }

    fn to_draft(&self) -> QuoteDraft {
        QuoteDraft {
            quote: self.quote.clone(),
            author: self.author.clone(),
            book: self.book.clone(),
            types: self.types.clone(),
            topics: self.topics.clone(),
        }
    }
}

impl Validate for QuoteDraft {
    fn validate(&self) -> Result<()> {
        require("quote", &self.quote)?;
        max_chars("author", &self.author, MAX_CHAR_FIELD)?;
        max_chars("book", &self.book, MAX_CHAR_FIELD)?;
        Ok(())
    }
}

/// A quote as the API presents it, with the derived read-only fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteResource {
    pub id: u64,
    pub signs: usize,
    pub font_size: FontSize,
    pub quote: String,
    pub author: String,
    pub book: String,
    #[serde(rename = "type")]
    pub types: Vec<u64>,
    pub topics: Vec<u64>,
}

impl From<Quote> for QuoteResource {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            signs: quote.signs(),
            font_size: quote.font_size(),
            quote: quote.quote,
            author: quote.author,
            book: quote.book,
            types: quote.types,
            topics: quote.topics,
        }
    }
}
