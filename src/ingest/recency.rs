// src/ingest/recency.rs
//! Freshness gate and "N ago" rendering for entry timestamps.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Render how long ago `published` was, relative to `now`.
///
/// Returns `None` for anything younger than a minute, including future-dated
/// items; callers drop those entries. Units are floored, never rounded.
pub fn classify(published: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    let delta = now.signed_duration_since(published).num_seconds();
    if delta < MINUTE {
        return None;
    }
    if delta >= DAY {
        Some(format!("{}d ago", delta / DAY))
    } else if delta >= HOUR {
        Some(format!("{}hr ago", delta / HOUR))
    } else {
        Some(format!("{}min ago", delta / MINUTE))
    }
}
