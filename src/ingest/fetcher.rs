// src/ingest/fetcher.rs
//! Per-source fetch: retrieve, parse, normalize, split into recent/older.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};

use crate::ingest::dates::resolve_timestamp;
use crate::ingest::providers::feed_xml::parse_feed;
use crate::ingest::recency;
use crate::ingest::text::{display_title, escape_markdown_v2};
use crate::ingest::types::{
    Entry, FeedSource, FeedTransport, RawEntry, SourceBuckets, TimedEntry, NO_LINK,
};

/// Why an entry did not make it past normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    NoTimestamp,
    NoLink,
    Seen,
    TooFresh,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::NoTimestamp => "no_timestamp",
            DropReason::NoLink => "no_link",
            DropReason::Seen => "seen",
            DropReason::TooFresh => "too_fresh",
        }
    }
}

/// Fetch one source. Failures are logged and yield empty buckets; one bad
/// source never aborts the cycle.
pub async fn fetch_source(
    transport: &dyn FeedTransport,
    source: &FeedSource,
    seen: &HashSet<String>,
    min_timestamp: i64,
    now: DateTime<Utc>,
) -> SourceBuckets {
    let t0 = std::time::Instant::now();
    counter!("news_fetch_sources_total").increment(1);

    let raw = match retrieve(transport, source).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = ?e, source = %source.name, url = %source.url, "feed fetch failed");
            counter!("news_fetch_source_errors_total").increment(1);
            return SourceBuckets::default();
        }
    };
    counter!("news_entries_parsed_total").increment(raw.len() as u64);

    let buckets = normalize_entries(&source.name, raw, seen, min_timestamp, now);

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("news_fetch_ms").record(ms);
    tracing::debug!(
        source = %source.name,
        recent = buckets.recent.len(),
        older = buckets.older.len(),
        ms,
        "feed fetched"
    );
    buckets
}

async fn retrieve(transport: &dyn FeedTransport, source: &FeedSource) -> Result<Vec<RawEntry>> {
    let body = transport
        .fetch(&source.url)
        .await
        .with_context(|| format!("fetching {}", source.name))?;
    parse_feed(&body).with_context(|| format!("parsing {}", source.name))
}

/// Turn raw entries into timed entries and bucket them around `min_timestamp`.
/// Both buckets come back sorted newest first.
pub fn normalize_entries(
    source_name: &str,
    raw: Vec<RawEntry>,
    seen: &HashSet<String>,
    min_timestamp: i64,
    now: DateTime<Utc>,
) -> SourceBuckets {
    let source = escape_markdown_v2(source_name);
    let mut out = SourceBuckets::default();

    for it in raw {
        let entry = match normalize_one(&source, it, seen, now) {
            Ok(e) => e,
            Err(reason) => {
                counter!("news_entries_dropped_total", "reason" => reason.as_str()).increment(1);
                continue;
            }
        };
        if entry.timestamp >= min_timestamp {
            out.recent.push(entry);
        } else {
            out.older.push(entry);
        }
    }

    out.recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    out.older.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    out
}

fn normalize_one(
    source: &str,
    raw: RawEntry,
    seen: &HashSet<String>,
    now: DateTime<Utc>,
) -> std::result::Result<TimedEntry, DropReason> {
    let published_at = resolve_timestamp(&raw).ok_or(DropReason::NoTimestamp)?;

    let link = raw
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(NO_LINK)
        .to_string();
    if link == NO_LINK {
        return Err(DropReason::NoLink);
    }
    if seen.contains(&link) {
        return Err(DropReason::Seen);
    }

    let published = recency::classify(published_at, now).ok_or(DropReason::TooFresh)?;

    Ok(TimedEntry {
        entry: Entry {
            title: display_title(raw.title.as_deref()),
            link,
            source: source.to_string(),
            published,
        },
        timestamp: published_at.timestamp(),
    })
}
