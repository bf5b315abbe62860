// tests/news_digest.rs
//
// Digest assembly over every category with canned feeds.

mod common;

use std::sync::Arc;

use common::{hours, mins, now, rss};
use news_digest::classify::keywords::SportsKeywords;
use news_digest::config::sources::NewsConfig;
use news_digest::digest::local_offset;
use news_digest::ingest::dedup::MemoryStore;
use news_digest::ingest::providers::fixture::StaticTransport;
use news_digest::ingest::types::FeedSource;
use news_digest::ingest::Aggregator;
use news_digest::{Category, NewsService};

fn service(transport: StaticTransport, cfg: NewsConfig) -> NewsService {
    NewsService::new(
        Aggregator::new(Arc::new(transport), Arc::new(MemoryStore::new())),
        cfg,
        SportsKeywords::default(),
    )
    .with_utc_offset(local_offset(6))
}

fn single_source_config() -> NewsConfig {
    let mut cfg = NewsConfig::default_seed();
    for c in Category::ALL {
        if let Some(cat) = cfg.categories.get_mut(&c) {
            let url = format!("https://{}.test/rss", c.key());
            cat.sources = vec![FeedSource::new(format!("{} Wire", c.key()), url)];
        }
    }
    cfg
}

#[tokio::test]
async fn digest_has_header_and_sections_in_order() {
    let mut transport = StaticTransport::new();
    for c in Category::ALL {
        let title = format!("{} headline", c.key());
        let link = format!("https://{}.test/1", c.key());
        transport = transport.with_feed(
            format!("https://{}.test/rss", c.key()),
            rss(&[(title.as_str(), link.as_str(), hours(3))]),
        );
    }
    let news = service(transport, single_source_config());

    let out = news.digest_at(now()).await;

    let expected = "*📢 DAILY NEWS DIGEST*\n_Jul 4, 2025 08:40am_\n\n\
        *🇧🇩 LOCAL NEWS:*\n1. [local headline](https://local.test/1) - local Wire (3hr ago)\n\n\
        *🌍 GLOBAL NEWS:*\n1. [global headline](https://global.test/1) - global Wire (3hr ago)\n\n\
        *🚀 TECH NEWS:*\n1. [tech headline](https://tech.test/1) - tech Wire (3hr ago)\n\n\
        *🏆 SPORTS NEWS:*\n1. [sports headline](https://sports.test/1) - sports Wire (3hr ago)\n\n\
        *🪙  CRYPTO & FINANCE NEWS:*\n1. [crypto headline](https://crypto.test/1) - crypto Wire (3hr ago)\n\n";
    assert_eq!(out, expected);
}

#[tokio::test]
async fn second_digest_does_not_repeat_links() {
    let transport = StaticTransport::new().with_feed(
        "https://tech.test/rss",
        rss(&[
            ("first", "https://tech.test/1", mins(30)),
            ("second", "https://tech.test/2", hours(5)),
        ]),
    );
    let mut cfg = single_source_config();
    if let Some(tech) = cfg.categories.get_mut(&Category::Tech) {
        tech.limit = 1;
    }
    let news = service(transport, cfg);

    let a = news.section_at(Category::Tech, now()).await;
    let b = news.section_at(Category::Tech, now()).await;
    let c = news.section_at(Category::Tech, now()).await;
    assert!(a.contains("https://tech.test/1"));
    assert!(b.contains("https://tech.test/2"));
    assert_eq!(c, "*🚀 TECH NEWS:*\n\n");
}

#[tokio::test]
async fn special_characters_are_escaped_exactly_once() {
    let transport = StaticTransport::new().with_feed(
        "https://crypto.test/rss",
        rss(&[(
            "Fed hikes rates (again)!",
            "https://crypto.test/fed",
            hours(1),
        )]),
    );
    let mut cfg = single_source_config();
    if let Some(crypto) = cfg.categories.get_mut(&Category::Crypto) {
        crypto.sources = vec![FeedSource::new("Yahoo! Finance", "https://crypto.test/rss")];
    }
    let news = service(transport, cfg);
    let out = news.section_at(Category::Crypto, now()).await;
    assert_eq!(
        out,
        "*🪙  CRYPTO & FINANCE NEWS:*\n\
         1. [Fed hikes rates \\(again\\)\\!](https://crypto.test/fed) - Yahoo\\! Finance (1hr ago)\n\n"
    );
}
