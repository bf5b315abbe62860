// src/bin/digest_once.rs
//! Print one digest (or one category section) to stdout.
//!
//! Usage: digest_once [local|global|tech|sports|crypto]

use anyhow::{Context, Result};
use news_digest::config::AppConfig;
use news_digest::{Category, NewsService};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    news_digest::init_tracing();

    let category = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<Category>())
        .transpose()?;

    let cfg = AppConfig::from_env().context("loading configuration")?;
    let news = NewsService::from_config(&cfg)?;

    let out = match category {
        Some(c) => news.section(c).await,
        None => news.digest().await,
    };
    print!("{out}");
    Ok(())
}
