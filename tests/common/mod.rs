// tests/common/mod.rs
//
// Shared helpers: a fixed clock and an RSS document builder.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 4, 2, 40, 0).unwrap()
}

pub fn mins(n: i64) -> Duration {
    Duration::minutes(n)
}

pub fn hours(n: i64) -> Duration {
    Duration::hours(n)
}

/// RSS 2.0 document with one item per `(title, link, age)`.
pub fn rss(items: &[(&str, &str, Duration)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>fixture</title>"#,
    );
    for (title, link, age) in items {
        xml.push_str(&format!(
            "<item><title>{}</title><link>{}</link><pubDate>{}</pubDate></item>",
            title,
            link,
            (now() - *age).to_rfc2822()
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

/// Atom document with one entry per `(title, link, age)`.
pub fn atom(items: &[(&str, &str, Duration)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="utf-8"?><feed xmlns="http://www.w3.org/2005/Atom"><title>fixture</title>"#,
    );
    for (title, link, age) in items {
        xml.push_str(&format!(
            r#"<entry><title>{}</title><link rel="alternate" href="{}"/><updated>{}</updated></entry>"#,
            title,
            link,
            (now() - *age).to_rfc3339()
        ));
    }
    xml.push_str("</feed>");
    xml
}
