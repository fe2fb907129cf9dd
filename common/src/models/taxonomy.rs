//! The two ways a quote is classified: by rhetorical type and by topic.

use serde::{Deserialize, Serialize};

use super::{MAX_CHAR_FIELD, Record, Validate, max_chars, require};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteType {
    pub id: u64,
    #[serde(rename = "type")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTypeDraft {
    #[serde(rename = "type")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u64,
    #[serde(rename = "topic")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDraft {
    #[serde(rename = "topic")]
    pub name: String,
}

impl Record for QuoteType {
    type Draft = QuoteTypeDraft;

    const NAME: &'static str = "Type";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: QuoteTypeDraft) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn to_draft(&self) -> QuoteTypeDraft {
        QuoteTypeDraft {
            name: self.name.clone(),
        }
    }
}

impl Record for Topic {
    type Draft = TopicDraft;

    const NAME: &'static str = "Topic";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: TopicDraft) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn to_draft(&self) -> TopicDraft {
        TopicDraft {
            name: self.name.clone(),
        }
    }
}

impl Validate for QuoteTypeDraft {
    fn validate(&self) -> Result<()> {
        require("type", &self.name)?;
        max_chars("type", &self.name, MAX_CHAR_FIELD)
    }
}

impl Validate for TopicDraft {
    fn validate(&self) -> Result<()> {
        require("topic", &self.name)?;
        max_chars("topic", &self.name, MAX_CHAR_FIELD)
    }
}
