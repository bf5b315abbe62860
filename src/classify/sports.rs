// src/classify/sports.rs
//! Topical composition of the sports section.

use serde::{Deserialize, Serialize};

use super::keywords::SportsKeywords;
use super::{assign_bucket, Bucket};
use crate::ingest::types::Entry;

/// How many entries each bucket may contribute, and the section size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SportsQuotas {
    pub football: usize,
    pub cricket: usize,
    pub celebrity: usize,
    /// Taken from the sports category `limit`, never from the quotas table.
    #[serde(skip)]
    pub target_total: usize,
}

impl Default for SportsQuotas {
    fn default() -> Self {
        Self {
            football: 2,
            cricket: 1,
            celebrity: 2,
            target_total: 5,
        }
    }
}

/// Compose a sports section from a recency-ordered pool.
///
/// Football, cricket and celebrity picks come first (in that order, each
/// capped by its quota), then unclaimed entries in pool order. If the
/// section is still short, claimed entries that missed their quota fill
/// the rest, again in pool order.
pub fn classify_sports(pool: &[Entry], tables: &SportsKeywords, quotas: SportsQuotas) -> Vec<Entry> {
    let buckets: Vec<Bucket> = pool
        .iter()
        .map(|e| assign_bucket(&plain_title(&e.title), tables))
        .collect();
    let mut placed = vec![false; pool.len()];
    let mut out: Vec<Entry> = Vec::with_capacity(quotas.target_total);

    let take = |bucket: Option<Bucket>, quota: usize, placed: &mut [bool], out: &mut Vec<Entry>| {
        let mut n = 0;
        for (i, e) in pool.iter().enumerate() {
            if n >= quota || out.len() >= quotas.target_total {
                break;
            }
            if placed[i] || bucket.is_some_and(|b| buckets[i] != b) {
                continue;
            }
            placed[i] = true;
            out.push(e.clone());
            n += 1;
        }
    };

    take(Some(Bucket::Football), quotas.football, &mut placed, &mut out);
    take(Some(Bucket::Cricket), quotas.cricket, &mut placed, &mut out);
    take(Some(Bucket::Celebrity), quotas.celebrity, &mut placed, &mut out);
    take(Some(Bucket::Other), usize::MAX, &mut placed, &mut out);
    // top-up from claimed entries left over by the quotas
    take(None, usize::MAX, &mut placed, &mut out);

    out
}

/// Titles arrive MarkdownV2-escaped; keywords like "kick-off" are written plain.
fn plain_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut chars = title.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        out.push(c);
    }
    out
}
