// src/ingest/dates.rs
//! Timestamp resolution for feed entries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::OffsetDateTime;

use crate::ingest::types::RawEntry;

/// Layouts with an explicit numeric offset, tried after named zones are rewritten.
const OFFSET_FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S %z",
    "%a, %d %b %Y %H:%M %z",
    "%d %b %Y %H:%M:%S %z",
    "%a %b %d %Y %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S %z",
];

/// Layouts without a zone; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Resolve an entry's publish time. Order: strict `published`, strict
/// `updated`, then lenient parsing of `published` and `updated`.
pub fn resolve_timestamp(raw: &RawEntry) -> Option<DateTime<Utc>> {
    let published = raw.published.as_deref();
    let updated = raw.updated.as_deref();
    published
        .and_then(parse_strict)
        .or_else(|| updated.and_then(parse_strict))
        .or_else(|| published.and_then(parse_lenient))
        .or_else(|| updated.and_then(parse_lenient))
}

/// RFC 2822 (RSS `pubDate`) or RFC 3339 (Atom, `dc:date`).
pub fn parse_strict(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    OffsetDateTime::parse(ts, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(ts, &Rfc3339))
        .ok()
        .and_then(|dt| DateTime::<Utc>::from_timestamp(dt.unix_timestamp(), 0))
}

/// Best-effort parsing of the date strings feeds emit in the wild.
pub fn parse_lenient(ts: &str) -> Option<DateTime<Utc>> {
    let s = ts.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_offset = rewrite_named_zone(s);
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn rewrite_named_zone(s: &str) -> String {
    for (name, offset) in [
        (" GMT", " +0000"),
        (" UTC", " +0000"),
        (" UT", " +0000"),
        ("Z", "+0000"),
    ] {
        if let Some(head) = s.strip_suffix(name) {
            return format!("{head}{offset}");
        }
    }
    s.to_string()
}
