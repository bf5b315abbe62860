// src/ingest/mod.rs
pub mod dates;
pub mod dedup;
pub mod fetcher;
pub mod providers;
pub mod recency;
pub mod select;
pub mod text;
pub mod types;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use tokio::sync::Mutex;

use crate::ingest::dedup::DedupStore;
use crate::ingest::fetcher::fetch_source;
use crate::ingest::select::{select, sort_pool};
use crate::ingest::types::{Entry, FeedSource, FeedTransport, SourceBuckets};

/// Upper bound on simultaneous feed requests per cycle.
pub const MAX_CONCURRENCY: usize = 8;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_fetch_sources_total", "Feed sources fetched.");
        describe_counter!(
            "news_fetch_source_errors_total",
            "Feed sources that failed to fetch or parse."
        );
        describe_counter!("news_entries_parsed_total", "Entries read from feed documents.");
        describe_counter!(
            "news_entries_dropped_total",
            "Entries dropped during normalization, by reason."
        );
        describe_counter!("news_entries_selected_total", "Entries selected for delivery.");
        describe_counter!(
            "news_dedup_store_errors_total",
            "Dedup store load/save failures."
        );
        describe_histogram!("news_fetch_ms", "Per-source fetch + parse time in milliseconds.");
        describe_gauge!("news_dedup_links", "Links remembered by the dedup store.");
    });
}

/// Selection parameters for one category fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchParams {
    pub limit: usize,
    pub max_per_source: usize,
    pub max_age_hours: i64,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            limit: 5,
            max_per_source: 3,
            max_age_hours: 12,
        }
    }
}

/// Parallel fetch orchestrator: fan out over sources, merge, select, remember.
pub struct Aggregator {
    transport: Arc<dyn FeedTransport>,
    store: Arc<dyn DedupStore>,
    max_concurrency: usize,
    // load -> select -> save is one critical section per process
    cycle: Mutex<()>,
}

impl Aggregator {
    pub fn new(transport: Arc<dyn FeedTransport>, store: Arc<dyn DedupStore>) -> Self {
        Self {
            transport,
            store,
            max_concurrency: MAX_CONCURRENCY,
            cycle: Mutex::new(()),
        }
    }

    /// Clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.clamp(1, MAX_CONCURRENCY);
        self
    }

    pub async fn fetch_all(&self, sources: &[FeedSource], params: FetchParams) -> Vec<Entry> {
        self.fetch_all_at(sources, params, Utc::now()).await
    }

    /// Run one cycle as of `now`. Never fails: broken sources contribute
    /// nothing and store errors are logged.
    pub async fn fetch_all_at(
        &self,
        sources: &[FeedSource],
        params: FetchParams,
        now: DateTime<Utc>,
    ) -> Vec<Entry> {
        ensure_metrics_described();
        if sources.is_empty() {
            return Vec::new();
        }

        let _cycle = self.cycle.lock().await;

        let mut seen = match self.store.load().await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = ?e, "dedup store load failed, starting empty");
                counter!("news_dedup_store_errors_total").increment(1);
                HashSet::new()
            }
        };

        let min_timestamp = now
            .timestamp()
            .saturating_sub(params.max_age_hours.saturating_mul(3600));
        let workers = self.max_concurrency.min(sources.len()).max(1);
        let transport = self.transport.as_ref();

        let jobs: Vec<_> = sources
            .iter()
            .map(|s| fetch_source(transport, s, &seen, min_timestamp, now))
            .collect();
        let results: Vec<SourceBuckets> = stream::iter(jobs).buffer_unordered(workers).collect().await;

        let mut recent = Vec::new();
        let mut older = Vec::new();
        for b in results {
            recent.extend(b.recent);
            older.extend(b.older);
        }
        sort_pool(&mut recent);
        sort_pool(&mut older);

        let picked = select(&recent, &older, params.limit, params.max_per_source);
        counter!("news_entries_selected_total").increment(picked.len() as u64);

        let before = seen.len();
        seen.extend(picked.iter().map(|e| e.entry.link.clone()));
        if seen.len() > before {
            if let Err(e) = self.store.save(&seen).await {
                tracing::warn!(error = ?e, "dedup store save failed");
                counter!("news_dedup_store_errors_total").increment(1);
            }
        }
        gauge!("news_dedup_links").set(seen.len() as f64);

        tracing::info!(
            sources = sources.len(),
            recent = recent.len(),
            older = older.len(),
            selected = picked.len(),
            "fetch cycle done"
        );

        picked.into_iter().map(|e| e.into_entry()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::dedup::MemoryStore;
    use crate::ingest::providers::fixture::StaticTransport;
    use anyhow::Result;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 4, 12, 0, 0).unwrap()
    }

    fn feed(items: &[(&str, &str, i64)]) -> String {
        let mut xml = String::from(r#"<rss version="2.0"><channel><title>t</title>"#);
        for (title, link, hours) in items {
            let ts = (now() - chrono::Duration::hours(*hours)).to_rfc2822();
            xml.push_str(&format!(
                "<item><title>{title}</title><link>{link}</link><pubDate>{ts}</pubDate></item>"
            ));
        }
        xml.push_str("</channel></rss>");
        xml
    }

    #[tokio::test]
    async fn empty_source_list_skips_the_store() {
        let transport = Arc::new(StaticTransport::new());
        let store = Arc::new(MemoryStore::with_links(["https://keep.test"]));
        let agg = Aggregator::new(transport.clone(), store.clone());
        let out = agg.fetch_all_at(&[], FetchParams::default(), now()).await;
        assert!(out.is_empty());
        assert_eq!(transport.calls(), 0);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn selected_links_are_remembered_and_not_repeated() {
        let transport = Arc::new(StaticTransport::new().with_feed(
            "https://a.test/rss",
            feed(&[("one", "https://a.test/1", 1), ("two", "https://a.test/2", 2)]),
        ));
        let store = Arc::new(MemoryStore::new());
        let agg = Aggregator::new(transport, store.clone());
        let sources = [FeedSource::new("A", "https://a.test/rss")];
        let params = FetchParams {
            limit: 1,
            ..FetchParams::default()
        };

        let first = agg.fetch_all_at(&sources, params, now()).await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].link, "https://a.test/1");

        let second = agg.fetch_all_at(&sources, params, now()).await;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].link, "https://a.test/2");

        let third = agg.fetch_all_at(&sources, params, now()).await;
        assert!(third.is_empty());
        assert_eq!(store.snapshot().len(), 2);
    }

    /// Counts overlapping requests and records the high-water mark.
    #[derive(Default)]
    struct SlowTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl FeedTransport for SlowTransport {
        async fn fetch(&self, url: &str) -> Result<String> {
            let now_running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now_running, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            let link = format!("{url}/1");
            Ok(feed(&[("story", link.as_str(), 1)]))
        }
    }

    fn many_sources(n: usize) -> Vec<FeedSource> {
        (0..n)
            .map(|i| FeedSource::new(format!("S{i}"), format!("https://s{i}.test/rss")))
            .collect()
    }

    #[tokio::test]
    async fn in_flight_fetches_never_exceed_the_cap() {
        let transport = Arc::new(SlowTransport::default());
        let agg = Aggregator::new(transport.clone(), Arc::new(MemoryStore::new()));
        let out = agg
            .fetch_all_at(&many_sources(20), FetchParams::default(), now())
            .await;
        assert_eq!(out.len(), 5);
        let peak = transport.peak.load(Ordering::SeqCst);
        assert!(peak <= MAX_CONCURRENCY, "peak={peak}");
        assert!(peak > 1, "fetches ran one at a time");
        assert_eq!(transport.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn configured_concurrency_lowers_the_cap() {
        let transport = Arc::new(SlowTransport::default());
        let agg = Aggregator::new(transport.clone(), Arc::new(MemoryStore::new()))
            .with_max_concurrency(3);
        agg.fetch_all_at(&many_sources(12), FetchParams::default(), now())
            .await;
        let peak = transport.peak.load(Ordering::SeqCst);
        assert!((2..=3).contains(&peak), "peak={peak}");
    }

    #[tokio::test]
    async fn extreme_max_age_does_not_overflow() {
        let transport = Arc::new(StaticTransport::new().with_feed(
            "https://a.test/rss",
            feed(&[("one", "https://a.test/1", 1), ("old", "https://a.test/2", 400)]),
        ));
        let agg = Aggregator::new(transport, Arc::new(MemoryStore::new()));
        let sources = [FeedSource::new("A", "https://a.test/rss")];

        let params = |max_age_hours| FetchParams {
            limit: 1,
            max_age_hours,
            ..FetchParams::default()
        };

        let widest = agg.fetch_all_at(&sources, params(i64::MAX), now()).await;
        assert_eq!(widest.len(), 1);
        assert_eq!(widest[0].link, "https://a.test/1");

        let narrowest = agg.fetch_all_at(&sources, params(i64::MIN), now()).await;
        assert_eq!(narrowest.len(), 1);
        assert_eq!(narrowest[0].link, "https://a.test/2");
    }

    #[test]
    fn concurrency_is_clamped() {
        let agg = Aggregator::new(Arc::new(StaticTransport::new()), Arc::new(MemoryStore::new()));
        assert_eq!(agg.with_max_concurrency(0).max_concurrency, 1);
        let agg = Aggregator::new(Arc::new(StaticTransport::new()), Arc::new(MemoryStore::new()));
        assert_eq!(agg.with_max_concurrency(64).max_concurrency, MAX_CONCURRENCY);
    }
}
