//! RSS and Atom parsing.
//!
//! The document kind is decided by the root element:
//!
//! | Root | Format | Entries |
//! |------|--------|---------|
//! | `<rss>` | RSS 0.9x / 2.0 | `channel/item` |
//! | `<rdf:RDF>` | RSS 1.0 | `item` |
//! | `<feed>` | Atom 1.0 | `entry` |
//!
//! Each entry is reduced to a [`FeedEntry`] holding the four fields the
//! aggregator exposes. Field selection:
//!
//! - **published**: RSS `pubDate`; Atom `published`, else `issued`. Dates
//!   that only describe a revision (`dc:date`, Atom `updated`) are ignored.
//! - **link**: RSS `link` text, else a permalink `guid`; Atom `link@href`
//!   with `rel="alternate"` or no `rel`, else the first link.
//! - **summary**: RSS `description`, else `content:encoded`; Atom `summary`,
//!   else `content`.
//!
//! The document is decoded with the encoding named by its BOM or XML
//! declaration (UTF-8 otherwise), and HTML5 named entities such as `&nbsp;`
//! are accepted alongside the five XML ones.

use quick_xml::Reader;
use quick_xml::de::{Deserializer, EntityResolver};
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesText, Event};
use serde::Deserialize;
use std::borrow::Cow;
use std::convert::Infallible;

use super::FeedError;

/// One entry of a parsed feed, in document order.
///
/// Values are trimmed; empty or absent elements are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub summary: Option<String>,
}

/// Element text, ignoring any attributes such as Atom's `type="html"`.
#[derive(Debug, Default, Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RdfDocument {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

// Repeated or unexpected duplicates must not fail the whole document, so
// every field is a list and the first non-empty value wins.
#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: Vec<Text>,
    #[serde(default)]
    link: Vec<Text>,
    #[serde(default)]
    guid: Vec<Guid>,
    #[serde(rename = "pubDate", default)]
    pub_date: Vec<Text>,
    #[serde(default)]
    description: Vec<Text>,
    #[serde(rename = "encoded", alias = "content:encoded", default)]
    content_encoded: Vec<Text>,
}

#[derive(Debug, Deserialize)]
struct Guid {
    #[serde(rename = "@isPermaLink", alias = "@ispermalink")]
    is_perma_link: Option<String>,
    #[serde(rename = "$text", default)]
    value: String,
}

impl Guid {
    /// A guid is a permalink unless it says `isPermaLink="false"`.
    fn permalink(self) -> Option<String> {
        let is_link = self
            .is_perma_link
            .as_deref()
            .is_none_or(|v| v.trim().eq_ignore_ascii_case("true"));
        if is_link { non_empty(self.value) } else { None }
    }
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: Vec<Text>,
    #[serde(default)]
    link: Vec<AtomLink>,
    #[serde(default)]
    published: Vec<Text>,
    #[serde(default)]
    issued: Vec<Text>,
    #[serde(default)]
    summary: Vec<Text>,
    #[serde(default)]
    content: Vec<Text>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: String,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Resolves HTML5 named entities (`&nbsp;`, `&hellip;`, ...) that feeds use
/// without declaring them.
#[derive(Debug, Default, Clone, Copy)]
struct HtmlEntities;

impl EntityResolver for HtmlEntities {
    type Error = Infallible;

    fn capture(&mut self, _doctype: BytesText<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn resolve(&self, entity: &str) -> Option<&str> {
        resolve_html5_entity(entity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Rss,
    Rdf,
    Atom,
}

/// Parse an RSS or Atom document into its entries.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] when the bytes are not well-formed XML, the
/// root element is not a known feed format, or the entries cannot be read.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let text = decode_document(bytes);
    let text = text.trim_start_matches('\u{feff}');

    let entries = match detect_kind(text)? {
        DocumentKind::Rss => {
            let doc: RssDocument = from_xml(text)?;
            doc.channel.items.into_iter().map(FeedEntry::from).collect()
        }
        DocumentKind::Rdf => {
            let doc: RdfDocument = from_xml(text)?;
            doc.items.into_iter().map(FeedEntry::from).collect()
        }
        DocumentKind::Atom => {
            let doc: AtomFeed = from_xml(text)?;
            doc.entries.into_iter().map(FeedEntry::from).collect()
        }
    };
    Ok(entries)
}

/// Decode raw feed bytes using the encoding declared by the document.
///
/// Falls back to lossy UTF-8 when the bytes do not fit the declared encoding.
fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    let mut reader = Reader::from_reader(bytes);
    // The reader picks up the encoding from a BOM or the XML declaration,
    // both of which precede the root element.
    loop {
        match reader.read_event() {
            Ok(Event::Decl(_) | Event::Start(_) | Event::Empty(_) | Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }

    reader
        .decoder()
        .decode(bytes)
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes))
}

fn from_xml<'de, T: Deserialize<'de>>(text: &'de str) -> Result<T, FeedError> {
    let mut de = Deserializer::from_str_with_resolver(text, HtmlEntities);
    T::deserialize(&mut de).map_err(|e| FeedError::Parse(format!("XML parse error: {e}")))
}

fn detect_kind(text: &str) -> Result<DocumentKind, FeedError> {
    let mut reader = Reader::from_str(text);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return match e.local_name().as_ref() {
                    b"rss" => Ok(DocumentKind::Rss),
                    b"RDF" => Ok(DocumentKind::Rdf),
                    b"feed" => Ok(DocumentKind::Atom),
                    other => Err(FeedError::Parse(format!(
                        "unsupported root element <{}>",
                        String::from_utf8_lossy(other)
                    ))),
                };
            }
            Ok(Event::Eof) => return Err(FeedError::Parse("document has no root element".into())),
            Ok(_) => {}
            Err(e) => return Err(FeedError::Parse(format!("XML parse error: {e}"))),
        }
    }
}

fn first_text(values: Vec<Text>) -> Option<String> {
    values.into_iter().find_map(|t| non_empty(t.value))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<RssItem> for FeedEntry {
    fn from(item: RssItem) -> Self {
        FeedEntry {
            title: first_text(item.title),
            link: first_text(item.link)
                .or_else(|| item.guid.into_iter().find_map(Guid::permalink)),
            published: first_text(item.pub_date),
            summary: first_text(item.description)
                .or_else(|| first_text(item.content_encoded)),
        }
    }
}

impl From<AtomEntry> for FeedEntry {
    fn from(entry: AtomEntry) -> Self {
        let preferred = entry
            .link
            .iter()
            .position(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .unwrap_or(0);
        let link = entry
            .link
            .into_iter()
            .nth(preferred)
            .and_then(|l| non_empty(l.href));

        FeedEntry {
            title: first_text(entry.title),
            link,
            published: first_text(entry.published).or_else(|| first_text(entry.issued)),
            summary: first_text(entry.summary).or_else(|| first_text(entry.content)),
        }
    }
}
