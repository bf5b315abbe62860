// src/classify/mod.rs
//! Keyword-based topical classification of entries.

pub mod keywords;
pub mod sports;

use std::collections::BTreeSet;

/// A flat list of lowercase keywords matched as substrings of a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    words: Vec<String>,
}

impl KeywordTable {
    /// Trims, lowercases and de-duplicates, keeping first occurrence order.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive substring match of any keyword against `title`.
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.words.iter().any(|w| title.contains(w.as_str()))
    }
}

/// Sports bucket, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Football,
    Cricket,
    Celebrity,
    Other,
}

/// First bucket in precedence order whose table matches `title`.
pub fn assign_bucket(title: &str, tables: &keywords::SportsKeywords) -> Bucket {
    if tables.football.matches(title) {
        Bucket::Football
    } else if tables.cricket.matches(title) {
        Bucket::Cricket
    } else if tables.celebrity.matches(title) {
        Bucket::Celebrity
    } else {
        Bucket::Other
    }
}
