// tests/metrics_ingest.rs
#![cfg(feature = "strict-metrics")]

mod common;

use std::sync::Arc;

use common::{hours, now, rss};
use news_digest::ingest::dedup::MemoryStore;
use news_digest::ingest::providers::fixture::StaticTransport;
use news_digest::ingest::types::FeedSource;
use news_digest::ingest::{Aggregator, FetchParams};
use news_digest::metrics::Metrics;

#[tokio::test]
async fn metrics_exposed_after_fetch_cycle() {
    // Install a local recorder for the test
    let metrics = Metrics::init().expect("recorder");

    let transport = StaticTransport::new()
        .with_failure("https://down.test/rss", "timeout")
        .with_feed(
            "https://ok.test/rss",
            rss(&[
                ("kept", "https://ok.test/1", hours(1)),
                ("fresh", "https://ok.test/2", chrono::Duration::seconds(10)),
            ]),
        );
    let agg = Aggregator::new(Arc::new(transport), Arc::new(MemoryStore::new()));
    let sources = [
        FeedSource::new("Down", "https://down.test/rss"),
        FeedSource::new("Ok", "https://ok.test/rss"),
    ];
    let out = agg.fetch_all_at(&sources, FetchParams::default(), now()).await;
    assert_eq!(out.len(), 1);

    // Scrape metrics text and check series presence by substring
    let text = metrics.handle.render();
    assert!(text.contains("news_fetch_sources_total"));
    assert!(text.contains("news_fetch_source_errors_total"));
    assert!(text.contains("news_entries_parsed_total"));
    assert!(text.contains(r#"news_entries_dropped_total{reason="too_fresh"}"#));
    assert!(text.contains("news_entries_selected_total"));
    assert!(text.contains("news_dedup_links"));
}
