// src/ingest/text.rs
//! Title cleanup and MarkdownV2 escaping.

use once_cell::sync::OnceCell;
use regex::Regex;

pub const NO_TITLE: &str = "No Title";

/// Backslash-escape every MarkdownV2 special character.
/// Apply once, at normalization time; escaping twice doubles the backslashes.
pub fn escape_markdown_v2(text: &str) -> String {
    static RE_SPECIAL: OnceCell<Regex> = OnceCell::new();
    let re = RE_SPECIAL.get_or_init(|| {
        Regex::new(r"([_*\[\]()~`>#+=|{}.!\-\\])").expect("markdown escape regex")
    });
    re.replace_all(text, r"\${1}").into_owned()
}

/// Decode entities, strip tags, collapse whitespace.
pub fn clean_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Collapse whitespace
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Display title for a raw feed title: cleaned, `No Title` when missing or
/// blank, square brackets removed (they would break the link markup), escaped.
pub fn display_title(raw: Option<&str>) -> String {
    let cleaned = raw.map(clean_text).unwrap_or_default();
    let title = if cleaned.is_empty() {
        NO_TITLE.to_string()
    } else {
        cleaned
    };
    escape_markdown_v2(&title.replace(['[', ']'], ""))
}
