use serde::{Deserialize, Serialize};

use super::{MAX_CHAR_FIELD, Record, Validate, max_chars, require};
use crate::error::Result;

/// A static content page, served at `/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
}

impl Record for Page {
    type Draft = PageDraft;

    const NAME: &'static str = "Page";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: PageDraft) -> Self {
        Self {
            id,
            title: draft.title,
            slug: draft.slug,
            content: draft.content,
        }
    }

    fn to_draft(&self) -> PageDraft {
        PageDraft {
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
        }
    }

    fn unique_key(&self) -> Option<(&'static str, &str)> {
        Some(("slug", &self.slug))
    }
}

impl Validate for PageDraft {
    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        max_chars("title", &self.title, MAX_CHAR_FIELD)?;
        require("slug", &self.slug)?;
        max_chars("slug", &self.slug, MAX_CHAR_FIELD)?;
        require("content", &self.content)?;
        Ok(())
    }
}
