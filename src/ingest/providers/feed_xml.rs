// src/ingest/providers/feed_xml.rs
//! Feed document parsing: RSS 2.0, RSS 1.0 (RDF) and Atom into [`RawEntry`]s.
//!
//! Item children are matched on their full element name, so namespaced
//! siblings such as `media:title` or `atom:link` never shadow `title`/`link`.

use anyhow::{anyhow, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::ingest::types::RawEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Rss,
    Rdf,
    Atom,
}

impl FeedKind {
    fn item_tag(&self) -> &'static [u8] {
        match self {
            FeedKind::Rss | FeedKind::Rdf => b"item",
            FeedKind::Atom => b"entry",
        }
    }
}

/// Parse a feed document into raw entries, whatever its dialect.
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let kind = detect_kind(&xml_clean)?;
    read_items(&xml_clean, kind).with_context(|| format!("parsing {kind:?} feed xml"))
}

/// Look at the root element to pick the dialect.
pub fn detect_kind(xml: &str) -> Result<FeedKind> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().context("reading feed root element")? {
            Event::Start(e) | Event::Empty(e) => {
                let local = e.local_name();
                return match local.as_ref() {
                    b"rss" => Ok(FeedKind::Rss),
                    b"RDF" => Ok(FeedKind::Rdf),
                    b"feed" => Ok(FeedKind::Atom),
                    other => Err(anyhow!(
                        "unsupported feed root element <{}>",
                        String::from_utf8_lossy(other)
                    )),
                };
            }
            Event::Eof => return Err(anyhow!("empty feed document")),
            _ => continue,
        }
    }
}

/// Child element of an item currently being read.
struct OpenField {
    name: Vec<u8>,
    depth: usize,
    attrs: Vec<(Vec<u8>, String)>,
    text: String,
}

/// Collected children of one item; first occurrence of each name wins.
#[derive(Default)]
struct ItemFields {
    title: Option<String>,
    link: Option<String>,
    /// `(rel, href)` of `<link href=.../>` children.
    href_links: Vec<(Option<String>, String)>,
    guid: Option<String>,
    guid_permalink: bool,
    pub_date: Option<String>,
    published: Option<String>,
    updated: Option<String>,
    dc_date: Option<String>,
    atom_updated: Option<String>,
}

fn read_items(xml: &str, kind: FeedKind) -> Result<Vec<RawEntry>> {
    let item_tag = kind.item_tag();
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();

    let mut depth = 0usize;
    let mut item: Option<(usize, ItemFields)> = None;
    let mut field: Option<OpenField> = None;

    loop {
        match reader.read_event().context("reading feed xml")? {
            Event::Start(e) => {
                depth += 1;
                match item.as_ref().map(|(d, _)| *d) {
                    None if e.name().as_ref() == item_tag => {
                        item = Some((depth, ItemFields::default()));
                    }
                    Some(item_depth) if field.is_none() && depth == item_depth + 1 => {
                        field = Some(open_field(&e, depth));
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if let Some((item_depth, fields)) = item.as_mut() {
                    if field.is_none() && depth == *item_depth {
                        fields.accept(open_field(&e, depth + 1));
                    }
                }
            }
            Event::Text(t) => {
                if let Some(f) = field.as_mut() {
                    let text = t
                        .unescape()
                        .map(|c| c.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(t.as_ref()).into_owned());
                    f.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(f) = field.as_mut() {
                    f.text.push_str(&String::from_utf8_lossy(c.as_ref()));
                }
            }
            Event::End(_) => {
                if field.as_ref().is_some_and(|f| f.depth == depth) {
                    if let (Some(f), Some((_, fields))) = (field.take(), item.as_mut()) {
                        fields.accept(f);
                    }
                } else if item.as_ref().is_some_and(|(d, _)| *d == depth) {
                    if let Some((_, fields)) = item.take() {
                        out.push(fields.into_raw());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn open_field(e: &BytesStart<'_>, depth: usize) -> OpenField {
    let attrs = e
        .attributes()
        .flatten()
        .map(|a| {
            let value = a
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&a.value).into_owned());
            (a.key.as_ref().to_vec(), value)
        })
        .collect();
    OpenField {
        name: e.name().as_ref().to_vec(),
        depth,
        attrs,
        text: String::new(),
    }
}

impl OpenField {
    fn attr(&self, key: &[u8]) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v.as_str())
    }
}

impl ItemFields {
    fn accept(&mut self, f: OpenField) {
        let text = non_blank(Some(f.text.clone()));
        match f.name.as_slice() {
            b"title" => first(&mut self.title, text),
            b"link" => match non_blank(f.attr(b"href").map(str::to_string)) {
                Some(href) => self
                    .href_links
                    .push((f.attr(b"rel").map(str::to_string), href)),
                None => first(&mut self.link, text),
            },
            b"guid" => {
                if self.guid.is_none() {
                    self.guid_permalink = f
                        .attr(b"isPermaLink")
                        .map(|v| !v.trim().eq_ignore_ascii_case("false"))
                        .unwrap_or(true);
                    self.guid = text;
                }
            }
            b"pubDate" => first(&mut self.pub_date, text),
            b"published" => first(&mut self.published, text),
            b"updated" => first(&mut self.updated, text),
            b"dc:date" => first(&mut self.dc_date, text),
            b"atom:updated" => first(&mut self.atom_updated, text),
            _ => {}
        }
    }

    fn into_raw(self) -> RawEntry {
        let alternate = self
            .href_links
            .iter()
            .find(|(rel, _)| matches!(rel.as_deref(), None | Some("alternate")))
            .or_else(|| self.href_links.first())
            .map(|(_, href)| href.clone());
        let permalink = self.guid_permalink;
        let guid_link = self.guid.filter(|g| permalink && looks_like_url(g));
        RawEntry {
            title: self.title,
            link: self.link.or(alternate).or(guid_link),
            published: self
                .pub_date
                .or(self.published)
                .or_else(|| self.dc_date.clone()),
            updated: self.atom_updated.or(self.updated).or(self.dc_date),
        }
    }
}

fn first(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn looks_like_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// HTML entities are not defined in XML; publishers still emit them.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
        .replace("&copy;", "(c)")
}
