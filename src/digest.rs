// src/digest.rs
//! MarkdownV2 rendering of sections and the digest header.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::ingest::types::Entry;

pub const DIGEST_TITLE: &str = "📢 DAILY NEWS DIGEST";

/// `*HEADING:*` followed by one numbered link line per entry and a blank line.
/// Entry fields are already escaped.
pub fn format_section(heading: &str, entries: &[Entry]) -> String {
    let mut msg = format!("*{heading}:*\n");
    for (idx, e) in entries.iter().enumerate() {
        let _ = writeln!(
            msg,
            "{}. [{}]({}) - {} ({})",
            idx + 1,
            e.title,
            e.link,
            e.source,
            e.published
        );
    }
    msg.push('\n');
    msg
}

/// Offset for `hours` east of UTC; UTC when out of range.
pub fn local_offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours.saturating_mul(3600)).unwrap_or_else(|| Utc.fix())
}

/// e.g. `Jul 4, 2025 08:40am`
pub fn format_timestamp(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format("%b %-d, %Y %I:%M%P")
        .to_string()
}

pub fn digest_header(now: DateTime<Utc>, offset: FixedOffset) -> String {
    format!("*{DIGEST_TITLE}*\n_{}_\n\n", format_timestamp(now, offset))
}
