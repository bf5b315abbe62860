// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Link value used when a feed entry carries no usable link.
pub const NO_LINK: &str = "#";

/// A named feed endpoint within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One item as it comes out of the feed document, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

/// Public entry shape handed to formatters and API consumers.
/// `title` and `source` are already escaped for MarkdownV2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub source: String,
    pub published: String, // e.g. "3hr ago"
}

/// Entry plus its absolute publish time (unix seconds). Internal to a fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEntry {
    pub entry: Entry,
    pub timestamp: i64,
}

impl TimedEntry {
    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

/// Per-source fetch result, each bucket sorted newest first.
#[derive(Debug, Clone, Default)]
pub struct SourceBuckets {
    pub recent: Vec<TimedEntry>,
    pub older: Vec<TimedEntry>,
}

/// Retrieval port: returns the raw feed document for a URL.
#[async_trait::async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
