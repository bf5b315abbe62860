// src/news.rs
//! Category entry points: fetch a category, render a section, build the digest.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::keywords::SportsKeywords;
use crate::classify::sports::{classify_sports, SportsQuotas};
use crate::config::sources::NewsConfig;
use crate::config::AppConfig;
use crate::digest::{digest_header, format_section, local_offset};
use crate::ingest::dedup::{DedupStore, JsonFileStore};
use crate::ingest::providers::http::HttpTransport;
use crate::ingest::types::{Entry, FeedTransport};
use crate::ingest::Aggregator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Local,
    Global,
    Tech,
    Sports,
    Crypto,
}

impl Category {
    /// Digest order.
    pub const ALL: [Category; 5] = [
        Category::Local,
        Category::Global,
        Category::Tech,
        Category::Sports,
        Category::Crypto,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Local => "local",
            Category::Global => "global",
            Category::Tech => "tech",
            Category::Sports => "sports",
            Category::Crypto => "crypto",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Category::Local => "🇧🇩 LOCAL NEWS",
            Category::Global => "🌍 GLOBAL NEWS",
            Category::Tech => "🚀 TECH NEWS",
            Category::Sports => "🏆 SPORTS NEWS",
            Category::Crypto => "🪙  CRYPTO & FINANCE NEWS",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s).ok_or_else(|| anyhow!("unknown news category: {s}"))
    }
}

pub struct NewsService {
    aggregator: Aggregator,
    config: NewsConfig,
    keywords: SportsKeywords,
    utc_offset: FixedOffset,
}

impl NewsService {
    pub fn new(aggregator: Aggregator, config: NewsConfig, keywords: SportsKeywords) -> Self {
        Self {
            aggregator,
            config,
            keywords,
            utc_offset: local_offset(6),
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// HTTP transport and JSON file store, as configured.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let transport: Arc<dyn FeedTransport> = Arc::new(HttpTransport::new(&cfg.fetch)?);
        let store: Arc<dyn DedupStore> = Arc::new(JsonFileStore::new(&cfg.fetch.dedup_path));
        let aggregator =
            Aggregator::new(transport, store).with_max_concurrency(cfg.fetch.max_concurrency);
        Ok(Self::new(aggregator, cfg.news.clone(), cfg.sports_keywords.clone())
            .with_utc_offset(local_offset(cfg.fetch.utc_offset_hours)))
    }

    pub async fn entries(&self, category: Category) -> Vec<Entry> {
        self.entries_at(category, Utc::now()).await
    }

    /// Selected entries for one category. Sports over-fetches and then
    /// composes a section of `limit` entries by topic.
    pub async fn entries_at(&self, category: Category, now: DateTime<Utc>) -> Vec<Entry> {
        let Some(cat) = self.config.category(category) else {
            tracing::warn!(category = category.key(), "category not configured");
            return Vec::new();
        };
        let pool = self
            .aggregator
            .fetch_all_at(&cat.sources, cat.fetch_params(), now)
            .await;
        match category {
            Category::Sports => {
                let quotas = SportsQuotas {
                    target_total: cat.limit,
                    ..self.config.sports_quotas
                };
                classify_sports(&pool, &self.keywords, quotas)
            }
            _ => pool,
        }
    }

    pub async fn section(&self, category: Category) -> String {
        self.section_at(category, Utc::now()).await
    }

    pub async fn section_at(&self, category: Category, now: DateTime<Utc>) -> String {
        let entries = self.entries_at(category, now).await;
        format_section(category.heading(), &entries)
    }

    pub async fn local_news(&self) -> String {
        self.section(Category::Local).await
    }

    pub async fn global_news(&self) -> String {
        self.section(Category::Global).await
    }

    pub async fn tech_news(&self) -> String {
        self.section(Category::Tech).await
    }

    pub async fn sports_news(&self) -> String {
        self.section(Category::Sports).await
    }

    pub async fn crypto_news(&self) -> String {
        self.section(Category::Crypto).await
    }

    pub async fn digest(&self) -> String {
        self.digest_at(Utc::now()).await
    }

    /// Header plus every section, fetched one category at a time.
    pub async fn digest_at(&self, now: DateTime<Utc>) -> String {
        let mut out = digest_header(now, self.utc_offset);
        for c in Category::ALL {
            out.push_str(&self.section_at(c, now).await);
        }
        out
    }
}
