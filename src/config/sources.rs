// src/config/sources.rs
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::sports::SportsQuotas;
use crate::ingest::types::FeedSource;
use crate::ingest::FetchParams;
use crate::news::Category;

pub const ENV_NEWS_SOURCES_PATH: &str = "NEWS_SOURCES_PATH";

/// Sources and selection parameters for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub limit: usize,
    pub max_per_source: usize,
    pub max_age_hours: i64,
    /// Over-fetch size handed to the aggregator when a classifier trims afterwards.
    pub pool_limit: Option<usize>,
    pub sources: Vec<FeedSource>,
}

impl CategoryConfig {
    fn with_sources(sources: &[(&str, &str)]) -> Self {
        let d = FetchParams::default();
        Self {
            limit: d.limit,
            max_per_source: d.max_per_source,
            max_age_hours: d.max_age_hours,
            pool_limit: None,
            sources: sources
                .iter()
                .map(|(name, url)| FeedSource::new(*name, *url))
                .collect(),
        }
    }

    /// Parameters for the aggregator call (uses `pool_limit` when set).
    pub fn fetch_params(&self) -> FetchParams {
        FetchParams {
            limit: self.pool_limit.unwrap_or(self.limit),
            max_per_source: self.max_per_source,
            max_age_hours: self.max_age_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsConfig {
    pub categories: BTreeMap<Category, CategoryConfig>,
    pub sports_quotas: SportsQuotas,
}

impl NewsConfig {
    pub fn category(&self, c: Category) -> Option<&CategoryConfig> {
        self.categories.get(&c)
    }

    /// Built-in source lists.
    pub fn default_seed() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(Category::Local, CategoryConfig::with_sources(LOCAL));
        categories.insert(Category::Global, CategoryConfig::with_sources(GLOBAL));
        categories.insert(Category::Tech, CategoryConfig::with_sources(TECH));
        let mut sports = CategoryConfig::with_sources(SPORTS);
        sports.pool_limit = Some(20);
        categories.insert(Category::Sports, sports);
        categories.insert(Category::Crypto, CategoryConfig::with_sources(CRYPTO));
        Self {
            categories,
            sports_quotas: SportsQuotas::default(),
        }
    }

    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading news sources from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let file = parse_sources(&content, &ext)
            .with_context(|| format!("parsing news sources in {}", path.display()))?;
        Ok(Self::default_seed().merged(file))
    }

    /// Load using env var + fallbacks:
    /// 1) $NEWS_SOURCES_PATH
    /// 2) config/sources.toml
    /// 3) config/sources.json
    /// 4) built-in seed
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_NEWS_SOURCES_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_NEWS_SOURCES_PATH} points to non-existent path"));
        }
        let toml_p = PathBuf::from("config/sources.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/sources.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default_seed())
    }

    fn merged(mut self, file: SourcesFile) -> Self {
        let named = [
            (Category::Local, file.local),
            (Category::Global, file.global),
            (Category::Tech, file.tech),
            (Category::Sports, file.sports),
            (Category::Crypto, file.crypto),
        ];
        for (cat, over) in named {
            let Some(over) = over else { continue };
            let Some(cfg) = self.categories.get_mut(&cat) else { continue };
            if let Some(v) = over.limit {
                cfg.limit = v;
            }
            if let Some(v) = over.max_per_source {
                cfg.max_per_source = v;
            }
            if let Some(v) = over.max_age_hours {
                cfg.max_age_hours = v;
            }
            if over.pool_limit.is_some() {
                cfg.pool_limit = over.pool_limit;
            }
            if let Some(sources) = over.sources {
                cfg.sources = clean_sources(cat, sources);
            }
        }
        if let Some(q) = file.sports_quotas {
            self.sports_quotas = q;
        }
        self
    }
}

/// On-disk shape: every section and field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourcesFile {
    local: Option<CategoryFile>,
    global: Option<CategoryFile>,
    tech: Option<CategoryFile>,
    sports: Option<CategoryFile>,
    crypto: Option<CategoryFile>,
    sports_quotas: Option<SportsQuotas>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryFile {
    limit: Option<usize>,
    max_per_source: Option<usize>,
    max_age_hours: Option<i64>,
    pool_limit: Option<usize>,
    sources: Option<Vec<FeedSource>>,
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<SourcesFile> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("invalid json");
    }
    match toml::from_str(s) {
        Ok(v) => Ok(v),
        Err(toml_err) => serde_json::from_str(s)
            .map_err(|_| anyhow!(toml_err))
            .context("unsupported sources format"),
    }
}

/// Trim names and urls; drop empty rows and repeated names (first wins).
fn clean_sources(cat: Category, items: Vec<FeedSource>) -> Vec<FeedSource> {
    let mut names = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let name = it.name.trim();
        let url = it.url.trim();
        if name.is_empty() || url.is_empty() {
            continue;
        }
        if !names.insert(name.to_string()) {
            tracing::warn!(category = cat.key(), source = name, "duplicate source name dropped");
            continue;
        }
        out.push(FeedSource::new(name, url));
    }
    out
}

const LOCAL: &[(&str, &str)] = &[
    ("Prothom Alo", "https://www.prothomalo.com/feed"),
    ("BDNews24", "https://bdnews24.com/feed"),
    ("Bangladesh Pratidin", "https://www.bd-pratidin.com/rss.xml"),
    ("Dhaka Tribune", "https://www.dhakatribune.com/articles.rss"),
    ("Jugantor", "https://www.jugantor.com/rss.xml"),
    ("Samakal", "https://samakal.com/rss.xml"),
    ("Jagonews24", "https://www.jagonews24.com/rss.xml"),
    ("Kaler Kantho", "https://www.kalerkantho.com/rss.xml"),
    ("Ittefaq", "https://www.ittefaq.com.bd/rss.xml"),
    ("Shomoy TV", "https://www.shomoynews.com/rss.xml"),
];

const GLOBAL: &[(&str, &str)] = &[
    ("BBC", "http://feeds.bbci.co.uk/news/rss.xml"),
    ("CNN", "http://rss.cnn.com/rss/edition.rss"),
    ("Reuters", "http://feeds.reuters.com/reuters/topNews"),
    ("Al Jazeera", "https://www.aljazeera.com/xml/rss/all.xml"),
    ("New York Post", "https://nypost.com/feed/"),
    ("The Guardian", "https://www.theguardian.com/world/rss"),
    ("The Washington Post", "https://feeds.washingtonpost.com/rss/world"),
    ("MSN", "https://www.msn.com/en-us/feed"),
    ("NBC News", "https://feeds.nbcnews.com/nbcnews/public/news"),
    (
        "The New York Times",
        "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml",
    ),
    ("The Economist", "https://www.economist.com/latest/rss.xml"),
    ("Axios", "https://www.axios.com/rss"),
    ("Fox News", "https://feeds.foxnews.com/foxnews/latest"),
];

const TECH: &[(&str, &str)] = &[
    ("TechCrunch", "http://feeds.feedburner.com/TechCrunch/"),
    ("The Verge", "https://www.theverge.com/rss/index.xml"),
    ("Wired", "https://www.wired.com/feed/rss"),
    ("CNET", "https://www.cnet.com/rss/news/"),
    ("Social Media Today", "https://www.socialmediatoday.com/rss.xml"),
    ("Tech Times", "https://www.techtimes.com/rss/tech.xml"),
    ("Droid Life", "https://www.droid-life.com/feed/"),
    ("Live Science", "https://www.livescience.com/home/feed/site.xml"),
    ("Ars Technica", "https://feeds.arstechnica.com/arstechnica/index"),
    ("Engadget", "https://www.engadget.com/rss.xml"),
    ("Mashable", "https://mashable.com/feed"),
    ("Gizmodo", "https://gizmodo.com/rss"),
    ("ZDNet", "https://www.zdnet.com/news/rss.xml"),
    ("VentureBeat", "https://venturebeat.com/feed/"),
    ("The Next Web", "https://thenextweb.com/feed/"),
    ("TechRadar", "https://www.techradar.com/rss"),
    ("Android Authority", "https://www.androidauthority.com/feed"),
    ("MacRumors", "https://www.macrumors.com/macrumors.xml"),
];

const SPORTS: &[(&str, &str)] = &[
    ("ESPN", "https://www.espn.com/espn/rss/news"),
    ("Sky Sports", "https://www.skysports.com/rss/12040"),
    ("BBC Sport", "http://feeds.bbci.co.uk/sport/rss.xml?edition=uk"),
    ("NBC Sports", "https://scores.nbcsports.com/rss/headlines.asp"),
    ("Yahoo Sports", "https://sports.yahoo.com/rss/"),
    ("The Guardian Sport", "https://www.theguardian.com/sport/rss"),
    ("CBS Sports", "https://www.cbssports.com/rss/headlines/"),
    ("Bleacher Report", "https://bleacherreport.com/articles/feed"),
    ("Sports Illustrated", "https://www.si.com/rss/si_topstories.rss"),
    ("Reuters Sports", "http://feeds.reuters.com/reuters/sportsNews"),
    (
        "Fox Sports",
        "https://www.foxsports.com/feedout/syndicatedContent?categoryId=0",
    ),
    (
        "USA Today Sports",
        "https://rssfeeds.usatoday.com/usatodaycomsports-topstories",
    ),
    ("Sporting News", "https://www.sportingnews.com/us/rss"),
    ("Goal.com", "https://www.goal.com/en/feeds/news?fmt=rss"),
    ("NBA", "https://www.nba.com/rss/nba_rss.xml"),
    ("NFL", "http://www.nfl.com/rss/rsslanding?searchString=home"),
];

const CRYPTO: &[(&str, &str)] = &[
    ("Cointelegraph", "https://cointelegraph.com/rss"),
    ("Decrypt", "https://decrypt.co/feed"),
    ("Coindesk", "https://www.coindesk.com/arc/outboundfeeds/rss/"),
    ("Forbes Crypto", "https://www.forbes.com/crypto-blockchain/feed/"),
    ("Bloomberg Crypto", "https://www.bloomberg.com/crypto/rss"),
    ("Yahoo Finance", "https://finance.yahoo.com/news/rssindex"),
    (
        "CNBC Finance",
        "https://www.cnbc.com/id/10001147/device/rss/rss.html",
    ),
    ("Financial Times", "https://www.ft.com/?format=rss"),
    ("MarketWatch", "https://www.marketwatch.com/rss/topstories"),
    (
        "Bloomberg Markets",
        "https://www.bloomberg.com/feed/podcast/etf-report.xml",
    ),
    ("The Block", "https://www.theblock.co/rss"),
    ("CryptoSlate", "https://cryptoslate.com/feed/"),
    ("Bitcoin Magazine", "https://bitcoinmagazine.com/.rss/full/"),
    ("Investing.com", "https://www.investing.com/rss/news_301.rss"),
];
