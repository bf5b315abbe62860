// src/ingest/select.rs
//! Selection: recency first, per-source cap, recent pool before older pool.

use std::collections::HashMap;

use crate::ingest::types::TimedEntry;

/// Pick up to `limit` entries. Both pools must already be sorted newest first.
///
/// The recent pool is walked first; the older pool only tops up a short
/// result. No source appears more than `max_per_source` times and an entry
/// equal to one already picked is skipped. May return fewer than `limit`.
pub fn select(
    recent: &[TimedEntry],
    older: &[TimedEntry],
    limit: usize,
    max_per_source: usize,
) -> Vec<TimedEntry> {
    let mut picked: Vec<TimedEntry> = Vec::with_capacity(limit);
    let mut per_source: HashMap<&str, usize> = HashMap::new();

    for pool in [recent, older] {
        if picked.len() >= limit {
            break;
        }
        for entry in pool {
            if picked.len() >= limit {
                break;
            }
            let count = per_source.get(entry.entry.source.as_str()).copied().unwrap_or(0);
            if count < max_per_source && !picked.contains(entry) {
                picked.push(entry.clone());
                per_source.insert(entry.entry.source.as_str(), count + 1);
            }
        }
    }

    picked
}

/// Global ordering for merged pools: newest first, then source, title, link,
/// so the result does not depend on which fetch finished first.
pub fn sort_pool(pool: &mut [TimedEntry]) {
    pool.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.entry.source.cmp(&b.entry.source))
            .then_with(|| a.entry.title.cmp(&b.entry.title))
            .then_with(|| a.entry.link.cmp(&b.entry.link))
    });
}
