// src/config/mod.rs
pub mod fetch;
pub mod sources;

use anyhow::Result;

use crate::classify::keywords::SportsKeywords;
use fetch::FetchConfig;
use sources::NewsConfig;

/// Everything the service needs at boot.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub news: NewsConfig,
    pub sports_keywords: SportsKeywords,
}

impl AppConfig {
    /// Env knobs, then source lists and keyword tables from their files (or the seed).
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            fetch: FetchConfig::from_env(),
            news: NewsConfig::load_default()?,
            sports_keywords: SportsKeywords::load_default()?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            news: NewsConfig::default_seed(),
            sports_keywords: SportsKeywords::default(),
        }
    }
}
